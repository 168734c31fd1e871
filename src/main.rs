#[macro_use]
extern crate log;
extern crate avl_collections;
extern crate simplelog;

use avl_collections::avl_tree::{AvlSet, Direction};
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::env;
use std::io::{self, BufRead, Write};

const NUM_OF_TREES: usize = 4;

enum Command {
    Insert(usize, Vec<char>),
    Add(usize, char),
    Show(usize),
    Copy(usize, usize),
    Merge(usize, usize),
    Pop(usize, Vec<Direction>),
    PopLow(usize, Vec<Direction>),
    PopFirst(usize, char, Vec<Direction>),
    Quit,
}

fn parse_tree(arg: Option<&str>) -> Option<usize> {
    let index: usize = arg?.parse().ok()?;
    if index >= 1 && index <= NUM_OF_TREES {
        Some(index - 1)
    } else {
        None
    }
}

fn parse_char(arg: Option<&str>) -> Option<char> {
    let mut chars = arg?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// "L" and "R" steps, e.g. "LR" is the right child of the left child of the root
fn parse_path(arg: Option<&str>) -> Option<Vec<Direction>> {
    arg.unwrap_or("")
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        })
        .collect()
}

fn parse_command(line: &str) -> Option<Command> {
    let mut args = line.split_whitespace();
    let command = match args.next()? {
        "insert" => {
            let index = parse_tree(args.next())?;
            let chars = args.flat_map(|arg| arg.chars()).collect();
            return Some(Command::Insert(index, chars));
        },
        "add" => Command::Add(parse_tree(args.next())?, parse_char(args.next())?),
        "show" => Command::Show(parse_tree(args.next())?),
        "copy" => Command::Copy(parse_tree(args.next())?, parse_tree(args.next())?),
        "merge" => Command::Merge(parse_tree(args.next())?, parse_tree(args.next())?),
        "pop" => Command::Pop(parse_tree(args.next())?, parse_path(args.next())?),
        "poplow" => Command::PopLow(parse_tree(args.next())?, parse_path(args.next())?),
        "popfirst" => {
            let index = parse_tree(args.next())?;
            let value = parse_char(args.next())?;
            Command::PopFirst(index, value, parse_path(args.next())?)
        },
        "quit" => Command::Quit,
        _ => return None,
    };
    match args.next() {
        Some(_) => None,
        None => Some(command),
    }
}

fn show<W: Write>(out: &mut W, index: usize, tree: &AvlSet<char>) -> io::Result<()> {
    writeln!(out, "------------- tree {} ----------------", index + 1)?;
    tree.write_levels(out)?;
    writeln!(out)
}

fn run<W: Write>(trees: &mut [AvlSet<char>], command: Command, out: &mut W) -> io::Result<bool> {
    match command {
        Command::Insert(index, chars) => {
            for c in chars {
                if !trees[index].insert(c) {
                    debug!("tree {} already contains {:?}", index + 1, c);
                }
            }
            show(out, index, &trees[index])?;
        },
        Command::Add(index, c) => {
            trees[index] += c;
            show(out, index, &trees[index])?;
        },
        Command::Show(index) => show(out, index, &trees[index])?,
        Command::Copy(from, to) => {
            let source = trees[from].clone();
            trees[to].clone_from(&source);
            show(out, to, &trees[to])?;
        },
        Command::Merge(into, from) => {
            let source = trees[from].clone();
            trees[into] += &source;
            show(out, into, &trees[into])?;
        },
        Command::Pop(index, path) => {
            match trees[index].pop_node(&path) {
                Ok(value) => writeln!(out, "{}", value)?,
                Err(error) => warn!("pop on tree {} failed: {}", index + 1, error),
            }
            show(out, index, &trees[index])?;
        },
        Command::PopLow(index, path) => {
            match trees[index].pop_low(&path) {
                Ok(value) => writeln!(out, "{}", value)?,
                Err(error) => warn!("poplow on tree {} failed: {}", index + 1, error),
            }
            show(out, index, &trees[index])?;
        },
        Command::PopFirst(index, c, path) => {
            match trees[index].pop_first_of(&c, &path) {
                Ok(value) => writeln!(out, "{}", value)?,
                Err(error) => warn!("popfirst {:?} on tree {} failed: {}", c, index + 1, error),
            }
            show(out, index, &trees[index])?;
        },
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn main() {
    let level = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(LevelFilter::Info);
    if SimpleLogger::init(level, Config::default()).is_err() {
        eprintln!("Error: could not initialize logger.");
    }

    let mut trees: Vec<AvlSet<char>> = (0..NUM_OF_TREES).map(|_| AvlSet::new()).collect();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                error!("could not read command: {}", error);
                break;
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Some(command) => command,
            None => {
                warn!("unrecognized command: {}", line.trim());
                continue;
            },
        };

        match run(&mut trees, command, &mut out) {
            Ok(true) => {},
            Ok(false) => break,
            Err(error) => {
                error!("could not write output: {}", error);
                break;
            },
        }
    }

    info!("exiting");
}

#[cfg(test)]
mod tests {
    use super::{parse_command, run, Command};
    use avl_collections::avl_tree::{AvlSet, Direction};

    fn trees() -> Vec<AvlSet<char>> {
        (0..super::NUM_OF_TREES).map(|_| AvlSet::new()).collect()
    }

    #[test]
    fn test_parse_command() {
        match parse_command("popfirst 2 x LR") {
            Some(Command::PopFirst(1, 'x', path)) => {
                assert_eq!(path, vec![Direction::Left, Direction::Right]);
            },
            _ => panic!("expected popfirst"),
        }
        match parse_command("pop 1") {
            Some(Command::Pop(0, path)) => assert!(path.is_empty()),
            _ => panic!("expected pop"),
        }
        assert!(parse_command("pop 5").is_none());
        assert!(parse_command("pop 1 LX").is_none());
        assert!(parse_command("add 1 ab").is_none());
        assert!(parse_command("show 1 2").is_none());
        assert!(parse_command("launch").is_none());
    }

    #[test]
    fn test_run() {
        let mut trees = trees();
        let mut out = Vec::new();

        for line in &["insert 1 abc", "copy 1 2", "insert 3 cd", "merge 3 2", "pop 3 R", "quit"] {
            let command = parse_command(line).unwrap();
            let keep_going = run(&mut trees, command, &mut out).unwrap();
            assert_eq!(keep_going, *line != "quit");
        }

        assert_eq!(trees[0], trees[1]);
        assert_eq!(trees[2].len(), 3);
        assert!(!trees[2].contains(&'d'));
        assert!(String::from_utf8(out).unwrap().starts_with("------------- tree 1"));
    }
}

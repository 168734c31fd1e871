extern crate serde;

#[cfg(test)]
extern crate bincode;
#[cfg(test)]
extern crate serde_test;

pub mod avl_tree;

pub mod interpreter;
pub mod output;
pub mod scope;

extern crate frontend;
extern crate tools;

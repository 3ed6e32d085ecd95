pub mod visitors;

//! Mockers for each category of type.
//!
//! Leaf mockers (`primitive`, `text`, `date`) terminate recursion. `bean`,
//! `generic`, `collection` and `enumeration` recurse back into the dispatcher
//! for nested types.

pub mod bean;
pub mod collection;
pub mod date;
pub mod enumeration;
pub mod generic;
pub mod primitive;
pub mod text;

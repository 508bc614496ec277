#![allow(dead_code)]

pub mod assertions;

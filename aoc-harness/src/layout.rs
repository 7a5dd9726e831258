//! Project-relative paths derived from a day number
//!
//! ```text
//! inputs/day{NN}.txt       puzzle input
//! inputs/day{NN}_test.txt  hand-written example input
//! build/day{NN}            compiled solution (external build step)
//! src/day{NN}.{ext}        generated solution skeleton
//! ```

use crate::template::Language;
use crate::unit::Unit;
use std::path::PathBuf;

pub const INPUT_DIR: &str = "inputs";
pub const BUILD_DIR: &str = "build";
pub const SOURCE_DIR: &str = "src";

fn stem(unit: Unit) -> String {
    format!("day{:02}", unit.get())
}

pub fn input_path(unit: Unit) -> PathBuf {
    PathBuf::from(INPUT_DIR).join(format!("{}.txt", stem(unit)))
}

pub fn test_input_path(unit: Unit) -> PathBuf {
    PathBuf::from(INPUT_DIR).join(format!("{}_test.txt", stem(unit)))
}

pub fn binary_path(unit: Unit) -> PathBuf {
    PathBuf::from(BUILD_DIR).join(stem(unit))
}

pub fn source_path(unit: Unit, language: Language) -> PathBuf {
    PathBuf::from(SOURCE_DIR).join(format!("{}.{}", stem(unit), language.extension()))
}

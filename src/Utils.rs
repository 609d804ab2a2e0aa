//! different utility modules used throughout the project
/// logger setup: terminal and log file through simplelog
pub mod logger;
/// run settings (group closure limit, simplifier, logging) read from a task document
pub mod settings;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
///
mod task_parser_tests;

use std::fmt::Arguments;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::Local;
use serde::Deserialize;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

pub struct Logger;

impl Logger {
    /// Sets the lowest level that still gets printed. Called once at start-up.
    pub fn set_level(level: LogLevel) {
        MIN_LEVEL.store(level as u8, Ordering::Relaxed);
    }

    pub fn enabled(level: LogLevel) -> bool {
        level as u8 >= MIN_LEVEL.load(Ordering::Relaxed)
    }

    pub fn info(args: Arguments) {
        if Logger::enabled(LogLevel::Info) {
            println!("[INFO ] [{}] {args}", Logger::timestamp());
        }
    }

    pub fn debug(args: Arguments) {
        if Logger::enabled(LogLevel::Debug) {
            println!("[DEBUG] [{}] {args}", Logger::timestamp());
        }
    }

    pub fn warn(args: Arguments) {
        if Logger::enabled(LogLevel::Warn) {
            eprintln!("[WARN ] [{}] {args}", Logger::timestamp());
        }
    }

    pub fn error(args: Arguments) {
        if Logger::enabled(LogLevel::Error) {
            eprintln!("[ERROR] [{}] {args}", Logger::timestamp());
        }
    }

    fn timestamp() -> String {
        Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
    }
}

#[macro_export]
macro_rules! logger {
    (INFO, $($arg:tt)*) => {
        Logger::info(format_args!($($arg)*))
    };
    (DEBUG, $($arg:tt)*) => {
        Logger::debug(format_args!($($arg)*))
    };
    (WARN, $($arg:tt)*) => {
        Logger::warn(format_args!($($arg)*))
    };
    (ERROR, $($arg:tt)*) => {
        Logger::error(format_args!($($arg)*))
    };
}

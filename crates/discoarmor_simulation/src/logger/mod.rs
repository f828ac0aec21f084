//! Глобальный pluggable logger
//!
//! Симуляция встраивается в разные host'ы (headless бинарь, тесты,
//! полноценный сервер), поэтому printer подменяемый: host ставит свой
//! `LogPrinter`, по умолчанию — консоль с timestamp'ами.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LEVEL_FILTER: Lazy<Mutex<Level>> = Lazy::new(|| Mutex::new(Level::Debug));

/// Severity уровня сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// Приёмник лог-сообщений (host-специфичный вывод)
pub trait LogPrinter: Send + Sync {
    fn print(&self, level: Level, message: &str);
}

/// Установить printer (перетирает предыдущий)
pub fn set_logger(printer: Box<dyn LogPrinter>) {
    *LOGGER.lock().unwrap() = Some(printer);
}

/// Минимальный уровень, который попадает в вывод
pub fn set_level_filter(level: Level) {
    *LEVEL_FILTER.lock().unwrap() = level;
}

/// Идемпотентная инициализация: консольный printer, если host
/// ещё не поставил свой
pub fn init_logger() {
    let mut logger = LOGGER.lock().unwrap();
    if logger.is_none() {
        *logger = Some(Box::new(ConsolePrinter));
    }
}

pub fn log_debug(message: &str) {
    log_with_level(Level::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(Level::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(Level::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(Level::Error, message);
}

fn log_with_level(level: Level, message: &str) {
    if level < *LEVEL_FILTER.lock().unwrap() {
        return;
    }
    // Timestamp добавляем здесь, а не в printer'е
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.print(level, &format!("[{}] {}", timestamp, message));
    }
}

struct ConsolePrinter;

impl LogPrinter for ConsolePrinter {
    fn print(&self, level: Level, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

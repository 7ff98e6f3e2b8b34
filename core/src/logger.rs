use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

pub struct Logger {
    use_colors: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.use_colors {
            let color = match level {
                LogLevel::Debug => "\x1b[90m",
                LogLevel::Info => "\x1b[37m",
                LogLevel::Warning => "\x1b[33m",
                LogLevel::Error => "\x1b[31m",
            };
            println!("{}{}\x1b[0m", color, message);
        } else {
            println!("{}", message);
        }

        std::io::stdout().flush().unwrap();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

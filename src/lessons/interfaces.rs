//! Lesson: trait-based dispatch
//!
//! A function that takes `&mut dyn Logger` accepts any of the three loggers
//! below without knowing which one it got. The lesson also stores a trait
//! object in a struct field, composes traits from smaller ones, swaps data
//! processors in a pipeline, and inspects values through [`Any`].

use crate::errors::LessonError;
use crate::memory::value::Value;
use crate::session::Session;
use std::any::Any;
use std::io::{self, Read, Write};

/// Contract shared by every logger.
///
/// Loggers hold configuration only; `log` returns the formatted line and the
/// caller decides where it goes.
pub trait Logger {
    fn log(&self, message: &str) -> String;
}

/// Logs to the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) -> String {
        format!("[CONSOLE] {}", message)
    }
}

/// Logs to a named file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogger {
    pub filename: String,
}

impl FileLogger {
    pub fn new(filename: impl Into<String>) -> Self {
        FileLogger {
            filename: filename.into(),
        }
    }
}

impl Logger for FileLogger {
    fn log(&self, message: &str) -> String {
        format!("[FILE] {} <- {}", self.filename, message)
    }
}

/// Logs as the statement a database logger would run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlLogger {
    pub connection_string: String,
}

impl SqlLogger {
    pub fn new(connection_string: impl Into<String>) -> Self {
        SqlLogger {
            connection_string: connection_string.into(),
        }
    }
}

impl Logger for SqlLogger {
    fn log(&self, message: &str) -> String {
        format!(
            "[SQL] INSERT INTO logs (message) VALUES ('{}')",
            message.replace('\'', "''")
        )
    }
}

/// Messages `process` sends to its logger
pub const PROCESS_MESSAGES: [&str; 3] = [
    "Processing started...",
    "Doing some work...",
    "Processing complete!",
];

/// Accepts any logger; the caller's code is the same for each of them
pub fn process(logger: &dyn Logger) -> Vec<String> {
    PROCESS_MESSAGES
        .iter()
        .map(|message| logger.log(message))
        .collect()
}

/// A server that depends on a logger only through its trait
pub struct Server {
    pub name: String,
    logger: Box<dyn Logger>,
}

impl Server {
    pub fn new(name: impl Into<String>, logger: Box<dyn Logger>) -> Self {
        Server {
            name: name.into(),
            logger,
        }
    }

    /// Lines logged while starting up
    pub fn start(&self) -> Vec<String> {
        vec![
            self.logger.log("Server starting..."),
            self.logger.log(&format!("Server name: {}", self.name)),
        ]
    }
}

/// Releases a resource; later reads and writes fail
pub trait Closer {
    fn close(&mut self) -> Result<(), LessonError>;
}

/// Composed of [`Read`] and [`Write`]
pub trait ReadWriter: Read + Write {}

impl<T: Read + Write> ReadWriter for T {}

/// Composed of [`Read`] and [`Closer`]
pub trait ReadCloser: Read + Closer {}

impl<T: Read + Closer> ReadCloser for T {}

/// In-memory file implementing [`Read`], [`Write`] and [`Closer`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFile {
    data: Vec<u8>,
    position: usize,
    closed: bool,
}

impl MemoryFile {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::other("file is closed"));
        }
        Ok(())
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open()?;
        let remaining = &self.data[self.position..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()
    }
}

impl Closer for MemoryFile {
    fn close(&mut self) -> Result<(), LessonError> {
        if self.closed {
            return Err(LessonError::Closed {
                resource: "memory file".to_string(),
            });
        }
        self.closed = true;
        Ok(())
    }
}

/// Write `text` through any [`ReadWriter`] and read everything back
pub fn echo_through(rw: &mut dyn ReadWriter, text: &str) -> io::Result<String> {
    rw.write_all(text.as_bytes())?;
    rw.flush()?;
    let mut out = String::new();
    rw.read_to_string(&mut out)?;
    Ok(out)
}

/// Drain a [`ReadCloser`], then close it
pub fn read_and_close(rc: &mut dyn ReadCloser) -> Result<String, LessonError> {
    let mut out = String::new();
    rc.read_to_string(&mut out)?;
    rc.close()?;
    Ok(out)
}

/// One stage of a text pipeline
pub trait DataProcessor {
    fn process(&self, data: &str) -> String;
}

/// Converts data to uppercase
pub struct ConvertProcessor;

impl DataProcessor for ConvertProcessor {
    fn process(&self, data: &str) -> String {
        data.to_uppercase()
    }
}

/// Removes surrounding whitespace
pub struct TrimProcessor;

impl DataProcessor for TrimProcessor {
    fn process(&self, data: &str) -> String {
        data.trim().to_string()
    }
}

/// Converts data to lowercase
pub struct LowercaseProcessor;

impl DataProcessor for LowercaseProcessor {
    fn process(&self, data: &str) -> String {
        data.to_lowercase()
    }
}

/// Run `data` through whichever processor the caller picked
pub fn run_pipeline(processor: &dyn DataProcessor, data: &str) -> String {
    processor.process(data)
}

/// Describe a value whose concrete type is only known at runtime
pub fn describe_anything(value: &dyn Any) -> String {
    if let Some(s) = value.downcast_ref::<String>() {
        format!("String value: {}", s)
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("String value: {}", s)
    } else if let Some(n) = value.downcast_ref::<i64>() {
        format!("Integer value: {}", n)
    } else if let Some(n) = value.downcast_ref::<i32>() {
        format!("Integer value: {}", n)
    } else if value.is::<ConsoleLogger>() {
        "This is a Logger!".to_string()
    } else {
        "Unknown type".to_string()
    }
}

pub fn run(session: &mut Session) -> Result<(), LessonError> {
    session.enter("main");
    session.println("=== Traits Learning Script ===\n");

    // Example 1
    session.println("Example 1: Basic Trait Usage");
    for line in process(&ConsoleLogger) {
        session.println(line);
    }
    session.println("");
    session.checkpoint("process() drives a ConsoleLogger")?;

    // Example 2
    session.println("Example 2: Switching Implementations");
    log_with_different_implementations(session)?;
    session.println("");

    // Example 3
    session.println("Example 3: Trait Object as Struct Field");
    let server = Server::new("WebServer", Box::new(ConsoleLogger));
    let startup = server.start();
    session.bind(
        "server",
        Value::record("Server", [("name", Value::from(server.name.as_str()))]),
    );
    for line in startup {
        session.println(line);
    }
    session.println("");
    session.checkpoint("The server only knows its logger through the trait")?;

    // Example 4
    session.println("Example 4: Data Processing Pipeline");
    let test_data = "  Hello World  ";
    session.bind("test_data", test_data);
    let uppercase = run_pipeline(&ConvertProcessor, test_data);
    session.println(format!("Uppercase: {}", uppercase));
    let lowercase = run_pipeline(&LowercaseProcessor, test_data);
    session.println(format!("Lowercase: {}", lowercase));
    let trimmed = run_pipeline(&TrimProcessor, test_data);
    session.println(format!("Trimmed: {}", trimmed));
    session.bind("uppercase", uppercase);
    session.bind("lowercase", lowercase);
    session.bind("trimmed", trimmed);
    session.println("");
    session.checkpoint("Swap processors without touching run_pipeline")?;

    // Example 5
    session.println("Example 5: Any & Downcasting");
    session.println(describe_anything(&"hello"));
    session.println(describe_anything(&42i64));
    session.println(describe_anything(&ConsoleLogger));
    session.println(describe_anything(&3.5f64));
    session.println("");
    session.checkpoint("Recover concrete types from &dyn Any")?;

    // Example 6
    session.println("Example 6: Trait Composition");
    let mut file = MemoryFile::new();
    let echoed = echo_through(&mut file, "composed traits")?;
    session.println(format!("ReadWriter echoed: {}", echoed));
    let rest = read_and_close(&mut file)?;
    session.println(format!("ReadCloser drained {} more byte(s) and closed", rest.len()));
    let after_close = file.write_all(b"late").is_err();
    session.println(format!("Write after close fails: {}", after_close));
    session.println("");
    session.checkpoint("ReadWriter and ReadCloser are built from smaller traits")?;

    session.println("Learning Tips");
    session.println("1. Step through each example in the viewer to see the state change");
    session.println("2. Try creating new implementations of the Logger trait");
    session.println("3. Notice how function signatures only depend on traits, not concrete types");
    session.println("4. Traits enable loose coupling and easy testing");
    session.println("5. Rust requires an explicit impl block for every trait a type satisfies");
    session.checkpoint("Learning tips")?;

    session.leave();
    Ok(())
}

fn log_with_different_implementations(session: &mut Session) -> Result<(), LessonError> {
    session.enter("log_with_different_implementations");

    let loggers: Vec<Box<dyn Logger>> = vec![
        Box::new(ConsoleLogger),
        Box::new(FileLogger::new("app.log")),
        Box::new(SqlLogger::new("postgres://localhost/logs")),
    ];
    for logger in &loggers {
        for line in process(logger.as_ref()) {
            session.println(line);
        }
    }
    session.checkpoint("The same call works for every logger")?;

    session.leave();
    Ok(())
}

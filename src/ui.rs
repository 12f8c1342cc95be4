//! User-facing message sinks.
//!
//! Commands never print directly. They report through the [`Ui`] trait,
//! which has a plain implementation ([`BasicUi`]) and a decorator that adds
//! severity colours ([`ColoredUi`]). [`select_ui`] picks between them based on
//! whether stdout is attached to a terminal.

use std::{
    cell::RefCell,
    io::{self, IsTerminal, Stderr, Stdout, Write},
};

use colored::{Color, Colorize};

pub trait Ui {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn output(&self, message: &str);
}

/// Writes `info`/`output` to the primary writer and `warn`/`error` to the
/// error writer.
pub struct BasicUi<W: Write, E: Write> {
    writer: RefCell<W>,
    error_writer: RefCell<E>,
}

impl BasicUi<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> BasicUi<W, E> {
    pub fn new(writer: W, error_writer: E) -> Self {
        Self {
            writer: RefCell::new(writer),
            error_writer: RefCell::new(error_writer),
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.writer.into_inner(), self.error_writer.into_inner())
    }

    fn write_line<T: Write>(target: &RefCell<T>, message: &str) {
        let mut target = target.borrow_mut();
        // A closed pipe must not abort the command mid-flight.
        let _ = writeln!(target, "{message}");
        let _ = target.flush();
    }
}

impl<W: Write, E: Write> Ui for BasicUi<W, E> {
    fn info(&self, message: &str) {
        Self::write_line(&self.writer, message);
    }

    fn warn(&self, message: &str) {
        Self::write_line(&self.error_writer, message);
    }

    fn error(&self, message: &str) {
        Self::write_line(&self.error_writer, message);
    }

    fn output(&self, message: &str) {
        Self::write_line(&self.writer, message);
    }
}

pub struct ColoredUi<U: Ui> {
    inner: U,
    info_color: Color,
    warn_color: Color,
    error_color: Color,
}

impl<U: Ui> ColoredUi<U> {
    pub fn new(inner: U) -> Self {
        Self {
            inner,
            info_color: Color::Green,
            warn_color: Color::Yellow,
            error_color: Color::Red,
        }
    }

    pub fn into_inner(self) -> U {
        self.inner
    }
}

impl<U: Ui> Ui for ColoredUi<U> {
    fn info(&self, message: &str) {
        self.inner.info(&message.color(self.info_color).to_string());
    }

    fn warn(&self, message: &str) {
        self.inner.warn(&message.color(self.warn_color).to_string());
    }

    fn error(&self, message: &str) {
        self.inner.error(&message.color(self.error_color).to_string());
    }

    fn output(&self, message: &str) {
        self.inner.output(message);
    }
}

pub fn select_ui() -> Box<dyn Ui> {
    if io::stdout().is_terminal() {
        Box::new(ColoredUi::new(BasicUi::stdio()))
    } else {
        Box::new(BasicUi::stdio())
    }
}

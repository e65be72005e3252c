/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::fmt::Display;
use std::io::Write;

/// A line-oriented text sink for assembler output. The assembler core never
/// decides where its trace and warning streams go; callers pick a sink.
pub trait DiagnosticSink {
    fn line(&mut self, text: &str);
}

// production sink over anything writable
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> DiagnosticSink for WriteSink<W> {
    fn line(&mut self, text: &str) {
        // Diagnostics are best-effort; a broken pipe must not abort assembly.
        let _ = writeln!(self.inner, "{text}");
    }
}

pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn line(&mut self, _text: &str) {}
}

// mock sink for testing
#[derive(Default)]
pub struct MockSink {
    pub lines: Vec<String>,
}

impl DiagnosticSink for MockSink {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// The verbose trace stream and the warning stream, bundled so every part of
/// the assembler reports through one handle with a uniform format.
pub struct Diagnostics<'a> {
    trace_sink: &'a mut dyn DiagnosticSink,
    warning_sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Diagnostics<'a> {
    pub fn new(
        trace_sink: &'a mut dyn DiagnosticSink,
        warning_sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            trace_sink,
            warning_sink,
        }
    }

    /// One trace line for a recognized source line.
    pub fn trace(&mut self, line: usize, message: impl Display) {
        self.trace_sink.line(&format!("{line}: {message}"));
    }

    /// An unprefixed trace line, used for the pass banners.
    pub fn banner(&mut self, text: &str) {
        self.trace_sink.line(text);
    }

    pub fn warn(&mut self, line: usize, message: impl Display) {
        self.warning_sink.line(&format!("{line}: warning: {message}"));
    }
}

//! Call stack for lesson visualization
//!
//! - [`Stack`]: the frames of the lesson's simulated call chain
//! - [`StackFrame`]: one function's bindings, kept in declaration order
//! - [`LocalVar`]: a named binding and its current [`Value`]
//!
//! Frames only record what a lesson chooses to bind; they are a picture of
//! the program state, not the storage the lesson actually computes with.

use super::value::Value;

/// A named binding in a frame
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVar {
    pub name: String,
    pub value: Value,
}

/// Stack frame for a function call
#[derive(Debug, Clone, PartialEq)]
pub struct StackFrame {
    pub function_name: String,
    locals: Vec<LocalVar>,
}

impl StackFrame {
    pub fn new(function_name: impl Into<String>) -> Self {
        StackFrame {
            function_name: function_name.into(),
            locals: Vec::new(),
        }
    }

    /// Declare `name`, or overwrite it in place if already declared
    pub fn bind(&mut self, name: &str, value: Value) {
        match self.locals.iter_mut().find(|var| var.name == name) {
            Some(var) => var.value = value,
            None => self.locals.push(LocalVar {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.locals
            .iter()
            .find(|var| var.name == name)
            .map(|var| &var.value)
    }

    /// Bindings in declaration order
    pub fn locals(&self) -> &[LocalVar] {
        &self.locals
    }
}

/// The call stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    frames: Vec<StackFrame>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { frames: Vec::new() }
    }

    pub fn push_frame(&mut self, function_name: impl Into<String>) {
        self.frames.push(StackFrame::new(function_name));
    }

    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut StackFrame> {
        self.frames.last_mut()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Total number of bindings across all frames
    pub fn binding_count(&self) -> usize {
        self.frames.iter().map(|f| f.locals.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_keeps_declaration_order() {
        let mut frame = StackFrame::new("main");
        frame.bind("a", Value::Int(5));
        frame.bind("b", Value::from("its not over"));
        frame.bind("a", Value::Int(6));

        let names: Vec<&str> = frame.locals().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(frame.get("a"), Some(&Value::Int(6)));
        assert_eq!(frame.get("missing"), None);
    }

    #[test]
    fn frames_push_and_pop() {
        let mut stack = Stack::new();
        stack.push_frame("main");
        stack.push_frame("add");
        stack.current_frame_mut().unwrap().bind("a", Value::Int(10));

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.binding_count(), 1);
        assert_eq!(stack.pop_frame().unwrap().function_name, "add");
        assert_eq!(stack.current_frame().unwrap().function_name, "main");
    }
}

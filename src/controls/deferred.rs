use std::collections::VecDeque;

/// Work scheduled to run on a later pass of the UI event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTask {
    /// Position, restore and show the panel once the rendering surface is ready
    FirstShow,
}

/// Single-threaded FIFO of deferred UI work, drained by the host each frame
#[derive(Debug, Default)]
pub struct UiTaskQueue {
    tasks: VecDeque<UiTask>,
}

impl UiTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: UiTask) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<UiTask> {
        self.tasks.pop_front()
    }

    /// Put a task back at the head to retry on the next pass
    pub fn defer(&mut self, task: UiTask) {
        self.tasks.push_front(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

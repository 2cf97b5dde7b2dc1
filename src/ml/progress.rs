use std::sync::mpsc::Sender;

/// Observer for fold-by-fold progress. Has no effect on the result.
pub trait FoldProgress {
    fn on_fold_start(&mut self, fold: usize, total: usize);
    fn on_fold_complete(&mut self, fold: usize, total: usize);
}

/// Debug-level log lines, the default observer
pub struct LogProgress {
    task: &'static str,
}

impl LogProgress {
    pub fn new(task: &'static str) -> Self {
        Self { task }
    }
}

impl FoldProgress for LogProgress {
    fn on_fold_start(&mut self, fold: usize, total: usize) {
        log::debug!("{}: fold {}/{} starting", self.task, fold + 1, total);
    }

    fn on_fold_complete(&mut self, fold: usize, total: usize) {
        log::debug!("{}: fold {}/{} complete", self.task, fold + 1, total);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    FoldStart { fold: usize, total: usize },
    FoldComplete { fold: usize, total: usize },
}

// For forwarding progress to another thread
pub struct ChannelProgress {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl FoldProgress for ChannelProgress {
    fn on_fold_start(&mut self, fold: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::FoldStart { fold, total });
    }

    fn on_fold_complete(&mut self, fold: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::FoldComplete { fold, total });
    }
}

//! Toast-style notifications queued by the service layer for the UI to drain.

use std::collections::VecDeque;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

/// FIFO queue of pending notices.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn push_success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeLevel::Success, title, message);
    }

    pub fn push_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeLevel::Error, title, message);
    }

    pub fn push_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeLevel::Info, title, message);
    }

    fn push(&mut self, level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) {
        self.pending.push_back(Notice {
            level,
            title: title.into(),
            message: message.into(),
        });
    }

    /// Drains every queued notice in arrival order.
    pub fn take(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_drain_in_arrival_order() {
        let mut queue = NoticeQueue::default();
        queue.push_error("Lỗi", "Không thể tải danh sách bài viết");
        queue.push_success("Thành công", "Đã lưu bài viết");

        let drained = queue.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Error);
        assert_eq!(drained[1].level, NoticeLevel::Success);
        assert!(queue.is_empty());
    }
}

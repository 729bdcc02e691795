use std::fmt;

/// Lifecycle of one list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// View state of a list owned by exactly one component.
///
/// Data is only ever what the backend returned; a failed load keeps the
/// previous rows and records the message.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub status: LoadStatus,
    pub data: Vec<T>,
    pub last_error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState {
            status: LoadStatus::Idle,
            data: Vec::new(),
            last_error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn finish_ok(&mut self, items: Vec<T>) {
        self.status = LoadStatus::Loaded;
        self.data = items;
        self.last_error = None;
    }

    pub fn finish_err(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Error;
        self.last_error = Some(message.into());
    }

    /// Appends a server-returned entity without reloading.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.status = LoadStatus::Loaded;
        self.last_error = None;
    }

    /// Drops every row matching `pred`, returning how many went.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.data.len();
        self.data.retain(|item| !pred(item));
        self.status = LoadStatus::Loaded;
        self.last_error = None;
        before - self.data.len()
    }

    /// Records a failed mutation; rows and status stay as they were.
    pub fn fail_action(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

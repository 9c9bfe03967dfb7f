use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionList,
    SessionLoad,
    SessionDelete,
    NewChat,
    Send,
    FileInspect,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in `TuiState`, mutated only by the reducer).
///
/// The reducer claims a task id when it emits the effect; the runtime's
/// `TaskStarted` only attaches the cancellation token. A completion whose id
/// is no longer active is stale and gets dropped.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` as the active task, superseding any previous one.
    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        if self.active == Some(started.id) {
            self.cancel = started.cancel.clone();
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_list: TaskState,
    pub session_load: TaskState,
    pub session_delete: TaskState,
    pub new_chat: TaskState,
    pub send: TaskState,
    pub file_inspect: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionList => &self.session_list,
            TaskKind::SessionLoad => &self.session_load,
            TaskKind::SessionDelete => &self.session_delete,
            TaskKind::NewChat => &self.new_chat,
            TaskKind::Send => &self.send,
            TaskKind::FileInspect => &self.file_inspect,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionList => &mut self.session_list,
            TaskKind::SessionLoad => &mut self.session_load,
            TaskKind::SessionDelete => &mut self.session_delete,
            TaskKind::NewChat => &mut self.new_chat,
            TaskKind::Send => &mut self.send,
            TaskKind::FileInspect => &mut self.file_inspect,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_list.is_running()
            || self.session_load.is_running()
            || self.session_delete.is_running()
            || self.new_chat.is_running()
            || self.send.is_running()
            || self.file_inspect.is_running()
    }
}

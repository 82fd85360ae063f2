/// Lifecycle of one thunk-style operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Status and last error of a single operation.
/// Each store operation owns one, so a failure in one never overwrites another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationState {
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl OperationState {
    pub fn begin(&mut self) {
        self.status = RequestStatus::Loading;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.status = RequestStatus::Succeeded;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = RequestStatus::Failed;
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.status == RequestStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.status == RequestStatus::Failed
    }
}

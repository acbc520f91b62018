use serde::{Deserialize, Serialize};

use crate::NavTarget;

/// A user-facing message, optionally tied to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutMessage {
    pub field: Option<String>,
    pub text: String,
}

impl CheckoutMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            field: None,
            text: text.into(),
        }
    }

    pub fn for_field(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            text: text.into(),
        }
    }
}

/// Outcome of one workflow operation: where to navigate next and/or which
/// errors to surface. When errors are present, a navigation target always
/// points back into the flow, never forward past the failing step.
#[derive(Debug, Clone, Default)]
pub struct CheckoutWorkflowResult {
    pub navigate_to: Option<NavTarget>,
    pub errors: Vec<CheckoutMessage>,
}

impl CheckoutWorkflowResult {
    /// Navigate without errors.
    pub fn redirect(target: NavTarget) -> Self {
        Self {
            navigate_to: Some(target),
            errors: Vec::new(),
        }
    }

    /// Stay on the current page, nothing to report.
    pub fn stay() -> Self {
        Self::default()
    }

    /// Stay on the current page and surface errors.
    pub fn errors_only(errors: Vec<CheckoutMessage>) -> Self {
        Self {
            navigate_to: None,
            errors,
        }
    }

    pub fn with_errors(target: Option<NavTarget>, errors: Vec<CheckoutMessage>) -> Self {
        Self {
            navigate_to: target,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// What a step handler decided for the current request.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// The step's requirement is satisfied; the flow may move on.
    pub success: bool,

    /// The step's page has nothing to decide and must not be shown. The
    /// destination is resolved by navigation, not by the handler's default.
    pub skip_page: bool,

    /// Explicit destination overriding the handler's own page.
    pub destination: Option<NavTarget>,

    pub errors: Vec<CheckoutMessage>,
}

impl StepOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Successful and the page should be skipped.
    pub fn skip() -> Self {
        Self {
            success: true,
            skip_page: true,
            ..Self::default()
        }
    }

    pub fn failure(errors: Vec<CheckoutMessage>) -> Self {
        Self {
            success: false,
            errors,
            ..Self::default()
        }
    }

    pub fn failure_with_message(text: impl Into<String>) -> Self {
        Self::failure(vec![CheckoutMessage::new(text)])
    }

    pub fn with_destination(mut self, destination: NavTarget) -> Self {
        self.destination = Some(destination);
        self
    }
}

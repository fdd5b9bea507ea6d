//! Checkout steps and progress

use std::{cmp::Ordering, fmt};

/// A stage of the checkout wizard, in the order the customer visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    /// Customer contact and address details.
    Info,

    /// Service date, time slot and instructions.
    Details,

    /// Card details.
    Payment,

    /// Order placed. Terminal.
    Confirmation,
}

impl CheckoutStep {
    /// All steps in wizard order.
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Info,
        CheckoutStep::Details,
        CheckoutStep::Payment,
        CheckoutStep::Confirmation,
    ];

    /// Heading shown for the step.
    pub fn label(self) -> &'static str {
        match self {
            CheckoutStep::Info => "Personal Information",
            CheckoutStep::Details => "Service Details",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    /// Zero-based position in the wizard.
    pub fn position(self) -> usize {
        match self {
            CheckoutStep::Info => 0,
            CheckoutStep::Details => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    /// Whether the step has no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        self == CheckoutStep::Confirmation
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Info => "info",
            CheckoutStep::Details => "details",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        };

        f.write_str(name)
    }
}

/// A request to move the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutAction {
    /// Submit the customer info form.
    SubmitCustomerInfo,

    /// Submit the service details form.
    SubmitServiceDetails,

    /// Submit the payment form and place the order.
    SubmitPayment,

    /// Return to the previous step.
    Back,
}

impl fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutAction::SubmitCustomerInfo => "submit customer info",
            CheckoutAction::SubmitServiceDetails => "submit service details",
            CheckoutAction::SubmitPayment => "submit payment",
            CheckoutAction::Back => "go back",
        };

        f.write_str(name)
    }
}

/// Where a step sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Already passed.
    Complete,

    /// The step being shown.
    Current,

    /// Not reached yet.
    Upcoming,
}

/// One entry of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    /// The step
    pub step: CheckoutStep,

    /// Its status relative to the current step
    pub status: StepStatus,
}

/// Status of every step given the current one.
pub fn progress(current: CheckoutStep) -> [StepProgress; 4] {
    CheckoutStep::ALL.map(|step| StepProgress {
        step,
        status: match step.position().cmp(&current.position()) {
            Ordering::Less => StepStatus::Complete,
            Ordering::Equal => StepStatus::Current,
            Ordering::Greater => StepStatus::Upcoming,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(current: CheckoutStep) -> [StepStatus; 4] {
        progress(current).map(|entry| entry.status)
    }

    #[test]
    fn progress_at_info() {
        assert_eq!(
            statuses(CheckoutStep::Info),
            [
                StepStatus::Current,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
                StepStatus::Upcoming
            ]
        );
    }

    #[test]
    fn progress_at_payment() {
        assert_eq!(
            statuses(CheckoutStep::Payment),
            [
                StepStatus::Complete,
                StepStatus::Complete,
                StepStatus::Current,
                StepStatus::Upcoming
            ]
        );
    }

    #[test]
    fn confirmation_is_current_not_complete() {
        assert_eq!(
            statuses(CheckoutStep::Confirmation),
            [
                StepStatus::Complete,
                StepStatus::Complete,
                StepStatus::Complete,
                StepStatus::Current
            ]
        );
    }

    #[test]
    fn positions_follow_wizard_order() {
        let positions = CheckoutStep::ALL.map(CheckoutStep::position);

        assert_eq!(positions, [0, 1, 2, 3]);
    }

    #[test]
    fn only_confirmation_is_terminal() {
        let terminal: Vec<CheckoutStep> = CheckoutStep::ALL
            .into_iter()
            .filter(|step| step.is_terminal())
            .collect();

        assert_eq!(terminal, [CheckoutStep::Confirmation]);
    }

    #[test]
    fn labels_and_display() {
        assert_eq!(CheckoutStep::Info.label(), "Personal Information");
        assert_eq!(CheckoutStep::Details.to_string(), "details");
        assert_eq!(CheckoutAction::Back.to_string(), "go back");
    }
}

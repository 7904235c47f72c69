//! Rules deciding when the assistant hands a conversation over to a manager.

use serde::{Deserialize, Serialize};

/// One scenario in which the dialogue may be routed to a human manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandoverOption {
    Complaint,
    Unclear,
    ReturnRequest,
    Discount,
    Legal,
    SensitiveWords,
}

impl HandoverOption {
    /// All options in display order.
    pub const ALL: [HandoverOption; 6] = [
        HandoverOption::Complaint,
        HandoverOption::Unclear,
        HandoverOption::ReturnRequest,
        HandoverOption::Discount,
        HandoverOption::Legal,
        HandoverOption::SensitiveWords,
    ];

    /// Form field name of the option.
    pub fn key(self) -> &'static str {
        match self {
            HandoverOption::Complaint => "complaint",
            HandoverOption::Unclear => "unclear",
            HandoverOption::ReturnRequest => "returnRequest",
            HandoverOption::Discount => "discount",
            HandoverOption::Legal => "legal",
            HandoverOption::SensitiveWords => "sensitiveWords",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandoverOption::Complaint => "Клиент жалуется или негативно настроен",
            HandoverOption::Unclear => "ИИ не понимает вопрос после нескольких попыток",
            HandoverOption::ReturnRequest => "Запрос на возврат товара",
            HandoverOption::Discount => "Запрос на индивидуальную скидку",
            HandoverOption::Legal => "Юридический или спорный вопрос",
            HandoverOption::SensitiveWords => "Упоминание “директор”, “жалоба”, “отказ”",
        }
    }
}

/// Independent on/off flag for every [`HandoverOption`].
///
/// `true` routes the scenario to a manager, `false` leaves it to the assistant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandoverOptions {
    pub complaint: bool,
    pub unclear: bool,
    pub return_request: bool,
    pub discount: bool,
    pub legal: bool,
    pub sensitive_words: bool,
}

impl Default for HandoverOptions {
    fn default() -> Self {
        Self {
            complaint: true,
            unclear: true,
            return_request: false,
            discount: false,
            legal: false,
            sensitive_words: false,
        }
    }
}

impl HandoverOptions {
    /// All options switched off.
    pub fn none() -> Self {
        Self {
            complaint: false,
            unclear: false,
            return_request: false,
            discount: false,
            legal: false,
            sensitive_words: false,
        }
    }

    fn slot(&mut self, option: HandoverOption) -> &mut bool {
        match option {
            HandoverOption::Complaint => &mut self.complaint,
            HandoverOption::Unclear => &mut self.unclear,
            HandoverOption::ReturnRequest => &mut self.return_request,
            HandoverOption::Discount => &mut self.discount,
            HandoverOption::Legal => &mut self.legal,
            HandoverOption::SensitiveWords => &mut self.sensitive_words,
        }
    }

    pub fn get(&self, option: HandoverOption) -> bool {
        match option {
            HandoverOption::Complaint => self.complaint,
            HandoverOption::Unclear => self.unclear,
            HandoverOption::ReturnRequest => self.return_request,
            HandoverOption::Discount => self.discount,
            HandoverOption::Legal => self.legal,
            HandoverOption::SensitiveWords => self.sensitive_words,
        }
    }

    pub fn set(&mut self, option: HandoverOption, value: bool) {
        *self.slot(option) = value;
    }

    /// Inverts a single option and returns its new value.
    pub fn toggle(&mut self, option: HandoverOption) -> bool {
        let slot = self.slot(option);
        *slot = !*slot;
        *slot
    }

    /// Options paired with their current value, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (HandoverOption, bool)> + '_ {
        HandoverOption::ALL
            .into_iter()
            .map(move |option| (option, self.get(option)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_route_complaints_and_unclear_questions() {
        let options = HandoverOptions::default();
        let enabled: Vec<_> = options
            .iter()
            .filter(|(_, value)| *value)
            .map(|(option, _)| option)
            .collect();
        assert_eq!(
            enabled,
            vec![HandoverOption::Complaint, HandoverOption::Unclear]
        );
    }

    #[test]
    fn toggle_inverts_only_the_selected_option() {
        for option in HandoverOption::ALL {
            let before = HandoverOptions::default();
            let mut after = before;

            let new_value = after.toggle(option);

            assert_eq!(new_value, !before.get(option));
            for other in HandoverOption::ALL.into_iter().filter(|o| *o != option) {
                assert_eq!(after.get(other), before.get(other), "{other:?} changed");
            }
        }
    }

    #[test]
    fn double_toggle_restores_value() {
        let mut options = HandoverOptions::default();
        options.toggle(HandoverOption::Legal);
        options.toggle(HandoverOption::Legal);
        assert_eq!(options, HandoverOptions::default());
    }
}

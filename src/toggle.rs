//! Sound toggle button presentation

use crate::consts::{CLASS_SOUND_OFF, CLASS_SOUND_ON, LABEL_SOUND_OFF, LABEL_SOUND_ON};
use crate::preference::SoundPreference;

/// Surface of the toggle button that reflects the preference
pub trait ToggleView {
    fn set_label(&self, label: &str);
    /// Add (`present = true`) or remove a marker class
    fn set_marker(&self, class: &str, present: bool);
}

/// What the button should look like for a given preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAppearance {
    pub label: &'static str,
    pub sound_on: bool,
}

impl ToggleAppearance {
    pub fn for_preference(pref: SoundPreference) -> Self {
        Self {
            label: if pref.enabled {
                LABEL_SOUND_ON
            } else {
                LABEL_SOUND_OFF
            },
            sound_on: pref.enabled,
        }
    }

    /// Apply label and both marker classes; exactly one marker ends up present
    pub fn apply(&self, view: &impl ToggleView) {
        view.set_label(self.label);
        view.set_marker(CLASS_SOUND_ON, self.sound_on);
        view.set_marker(CLASS_SOUND_OFF, !self.sound_on);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    #[derive(Default)]
    pub(crate) struct FakeButton {
        pub label: RefCell<String>,
        pub classes: RefCell<BTreeSet<String>>,
    }

    impl FakeButton {
        pub fn has(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }
    }

    impl ToggleView for FakeButton {
        fn set_label(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
        }

        fn set_marker(&self, class: &str, present: bool) {
            let mut classes = self.classes.borrow_mut();
            if present {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
    }

    #[test]
    fn test_off_appearance() {
        let btn = FakeButton::default();
        ToggleAppearance::for_preference(SoundPreference::new(false)).apply(&btn);
        assert_eq!(*btn.label.borrow(), "🔕 Activar sonido");
        assert!(btn.classes.borrow().contains("admin-sound-off"));
        assert!(!btn.classes.borrow().contains("admin-sound-on"));
    }

    #[test]
    fn test_markers_are_exclusive() {
        let btn = FakeButton::default();
        btn.classes.borrow_mut().insert("admin-sound-off".to_string());
        btn.classes.borrow_mut().insert("btn".to_string());

        ToggleAppearance::for_preference(SoundPreference::new(true)).apply(&btn);
        assert_eq!(*btn.label.borrow(), "🔔 Desactivar sonido");
        let classes = btn.classes.borrow();
        assert!(classes.contains("admin-sound-on"));
        assert!(!classes.contains("admin-sound-off"));
        // Unrelated classes are left alone
        assert!(classes.contains("btn"));
    }
}

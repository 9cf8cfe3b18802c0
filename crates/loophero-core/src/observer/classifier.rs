//! Event classification against the monitored app table.
//!
//! Classification is a pure function of the event and [`MONITORED_APPS`]:
//! the app identifier is looked up first, then the element kind is compared
//! against the rule for that app.

use serde::{Deserialize, Serialize};

use super::event::{ObservedEvent, ScrollDirection};

/// A `(app, element kind)` pair whose scrolls are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonitoredAppRule {
    pub app_id: &'static str,
    pub element_kind: &'static str,
    /// Human-readable app name for listings.
    pub label: &'static str,
}

/// Short-video feeds whose paging container is observed.
pub const MONITORED_APPS: [MonitoredAppRule; 3] = [
    MonitoredAppRule {
        app_id: "com.instagram.android",
        element_kind: "androidx.viewpager.widget.ViewPager",
        label: "Instagram Reels",
    },
    MonitoredAppRule {
        app_id: "com.zhiliaoapp.musically",
        element_kind: "androidx.viewpager.widget.ViewPager",
        label: "TikTok",
    },
    MonitoredAppRule {
        app_id: "com.google.android.youtube",
        element_kind: "android.view.ViewGroup",
        label: "YouTube Shorts",
    },
];

/// Classification outcome for one observed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum ScrollSignal {
    /// Scroll of a monitored feed container.
    CountableSwipe { direction: ScrollDirection },
    /// The user is in some other app; the running count is void.
    ContextReset,
    /// A monitored app scrolled something other than its feed.
    Ignore,
}

/// Find the rule for an app identifier.
pub fn rule_for(app_id: &str) -> Option<&'static MonitoredAppRule> {
    MONITORED_APPS.iter().find(|rule| rule.app_id == app_id)
}

pub fn is_monitored(app_id: &str) -> bool {
    rule_for(app_id).is_some()
}

/// Classify an event.
pub fn classify(event: &ObservedEvent) -> ScrollSignal {
    match rule_for(&event.source_app) {
        None => ScrollSignal::ContextReset,
        Some(rule) if rule.element_kind == event.source_element_kind => {
            ScrollSignal::CountableSwipe {
                direction: event.direction(),
            }
        }
        Some(_) => ScrollSignal::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(app: &str, kind: &str, delta: i32) -> ObservedEvent {
        ObservedEvent::scrolled(app, kind, delta, 1_000)
    }

    #[test]
    fn every_rule_is_countable() {
        for rule in MONITORED_APPS.iter() {
            let signal = classify(&event(rule.app_id, rule.element_kind, 40));
            assert_eq!(
                signal,
                ScrollSignal::CountableSwipe {
                    direction: ScrollDirection::Up
                }
            );
        }
    }

    #[test]
    fn direction_is_carried_but_not_filtered() {
        let signal = classify(&event(
            "com.zhiliaoapp.musically",
            "androidx.viewpager.widget.ViewPager",
            -3,
        ));
        assert_eq!(
            signal,
            ScrollSignal::CountableSwipe {
                direction: ScrollDirection::Down
            }
        );
    }

    #[test]
    fn monitored_app_with_other_element_is_ignored() {
        let signal = classify(&event(
            "com.instagram.android",
            "androidx.recyclerview.widget.RecyclerView",
            40,
        ));
        assert_eq!(signal, ScrollSignal::Ignore);
    }

    #[test]
    fn element_kinds_are_not_shared_across_apps() {
        // YouTube's rule is ViewGroup, not the ViewPager the other two use.
        let signal = classify(&event(
            "com.google.android.youtube",
            "androidx.viewpager.widget.ViewPager",
            40,
        ));
        assert_eq!(signal, ScrollSignal::Ignore);
    }

    #[test]
    fn unmonitored_app_resets_context() {
        assert_eq!(
            classify(&event("com.android.chrome", "android.webkit.WebView", 40)),
            ScrollSignal::ContextReset
        );
        assert_eq!(classify(&event("", "", 0)), ScrollSignal::ContextReset);
    }

    #[test]
    fn lookup_helpers() {
        assert!(is_monitored("com.google.android.youtube"));
        assert!(!is_monitored("com.google.android.youtube.music"));
        assert_eq!(rule_for("com.zhiliaoapp.musically").unwrap().label, "TikTok");
    }
}

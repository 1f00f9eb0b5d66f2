//! Profile tab menus

/// What a profile menu item opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemKind {
    /// App settings
    Settings,
    /// Notification preferences
    Notifications,
    /// Privacy and permissions
    Privacy,
    /// Payment methods
    Payments,
}

/// A menu item on the profile screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Destination kind
    pub kind: MenuItemKind,
    /// Icon name
    pub icon: &'static str,
    /// Main label
    pub title: &'static str,
    /// Secondary label
    pub subtitle: &'static str,
}

/// View model for the Profile tab
#[derive(Debug, Clone, Default)]
pub struct ProfileViewModel;

impl ProfileViewModel {
    /// Create the view model
    pub fn new() -> Self {
        Self
    }

    /// User preference items
    pub fn preferences(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                kind: MenuItemKind::Settings,
                icon: "settings",
                title: "Settings",
                subtitle: "Personalize your app",
            },
            MenuItem {
                kind: MenuItemKind::Notifications,
                icon: "notifications",
                title: "Notifications",
                subtitle: "Sounds, alerts, quiet hours",
            },
        ]
    }

    /// Security items
    pub fn security(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                kind: MenuItemKind::Privacy,
                icon: "privacy_tip",
                title: "Privacy",
                subtitle: "Permissions, device access",
            },
            MenuItem {
                kind: MenuItemKind::Payments,
                icon: "credit_card",
                title: "Payments",
                subtitle: "Cards, billing, receipts",
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus() {
        let vm = ProfileViewModel::new();
        let prefs: Vec<MenuItemKind> = vm.preferences().iter().map(|i| i.kind).collect();
        let security: Vec<MenuItemKind> = vm.security().iter().map(|i| i.kind).collect();
        assert_eq!(prefs, vec![MenuItemKind::Settings, MenuItemKind::Notifications]);
        assert_eq!(security, vec![MenuItemKind::Privacy, MenuItemKind::Payments]);
        assert_eq!(vm.security()[1].subtitle, "Cards, billing, receipts");
    }
}

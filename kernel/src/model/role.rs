use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Organizer,
    #[default]
    Participant,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    // イベントの作成・管理が許可されたロールかどうか
    pub fn can_manage_events(&self) -> bool {
        matches!(self, Role::Admin | Role::Organizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("organizer").unwrap(), Role::Organizer);
        assert_eq!(Role::from_str("participant").unwrap(), Role::Participant);
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_events());
        assert!(Role::Organizer.can_manage_events());
        assert!(!Role::Participant.can_manage_events());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Organizer.is_admin());
    }
}

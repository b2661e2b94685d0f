// src/auth.rs

/// Upload password check. Plain comparison; the password lives in `AppConfig`.
pub fn check_password(input: &str, expected: &str) -> bool {
    input == expected
}

/// Login flag for the upload/history panels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool { self.logged_in }

    /// Returns whether the attempt succeeded.
    pub fn login(&mut self, input: &str, expected: &str) -> bool {
        self.logged_in = check_password(input, expected);
        if self.logged_in {
            logf!("Auth: login ok");
        } else {
            logf!("Auth: login rejected");
        }
        self.logged_in
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        logf!("Auth: logout");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_logout() {
        let mut s = Session::default();
        assert!(!s.login("Admin", "admin"));
        assert!(!s.is_logged_in());
        assert!(s.login("admin", "admin"));
        assert!(s.is_logged_in());
        s.logout();
        assert!(!s.is_logged_in());
    }
}

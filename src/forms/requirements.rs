use serde::Serialize;

/// Static assets a form needs loaded alongside it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Requirements {
    pub javascript: Vec<String>,
    pub css: Vec<String>,
}

impl Requirements {
    pub fn javascript(&mut self, path: &str) {
        if !self.javascript.iter().any(|p| p == path) {
            self.javascript.push(path.to_string());
        }
    }

    pub fn css(&mut self, path: &str) {
        if !self.css.iter().any(|p| p == path) {
            self.css.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_are_declared_once() {
        let mut requirements = Requirements::default();
        requirements.javascript("client/javascript/SubscriptionPage.js");
        requirements.javascript("client/javascript/SubscriptionPage.js");
        requirements.css("client/css/SubscriptionPage.css");

        assert_eq!(1, requirements.javascript.len());
        assert_eq!(1, requirements.css.len());
    }
}

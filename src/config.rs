use config::{Config, File};

pub fn get_config() -> Config {
    let mut config = Config::default();
    config
        .merge(vec![File::with_name("config/config.toml").required(false)])
        .unwrap();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttls() {
        let config = get_config();

        assert_eq!(config.get_int("session_ttl").unwrap_or(24), 24);
        assert_eq!(config.get_int("session_long_ttl").unwrap_or(30), 30);
    }
}

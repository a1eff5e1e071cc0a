#[cfg(test)]
mod config_tests {
    use crate::config::{
        default_bookings_table, default_host, default_log_level, default_max_request_size,
        default_menu_table, default_orders_table, default_port, default_region,
        default_rooms_table, default_service_name, default_timeout, Config, ConfigError,
        ServerConfig, StorageBackend,
    };
    use std::time::Duration;

    fn settings(overrides: &[(&str, &str)]) -> config::Config {
        let mut builder = config::Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_settings(&settings(&[])).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.server.max_request_size, 1024 * 1024);
        assert!(config.server.public_base_url.is_none());

        assert_eq!(config.database.storage_backend, StorageBackend::DynamoDb);
        assert_eq!(config.database.rooms_table_name, "HotelRooms");
        assert_eq!(config.database.menu_table_name, "HotelMenuItems");
        assert!(!config.database.auto_create_tables);
        assert!(config.database.seed_on_startup);
        assert!(config.database.endpoint_url.is_none());

        assert_eq!(config.observability.service_name, "hotel-ulin");
        assert!(config.observability.otlp_endpoint.is_none());
        assert!(!config.observability.enable_json_logging);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_settings(&settings(&[
            ("port", "9100"),
            ("public_base_url", "https://hotelulin.al"),
            ("storage_backend", "memory"),
            ("orders_table_name", "TestOrders"),
            ("auto_create_tables", "true"),
            ("otlp_endpoint", "http://collector:4317"),
            ("log_level", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.server.public_base_url.as_deref(),
            Some("https://hotelulin.al")
        );
        assert_eq!(config.database.storage_backend, StorageBackend::Memory);
        assert_eq!(config.database.orders_table_name, "TestOrders");
        assert!(config.database.auto_create_tables);
        assert_eq!(
            config.observability.otlp_endpoint.as_deref(),
            Some("http://collector:4317")
        );
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let result = Config::from_settings(&settings(&[("port", "0")]));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = Config::from_settings(&settings(&[("request_timeout_seconds", "0")]));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_validation_rejects_empty_table_name() {
        let result = Config::from_settings(&settings(&[("menu_table_name", " ")]));
        match result {
            Err(ConfigError::ValidationError { message }) => {
                assert_eq!(message, "Menu table name cannot be empty")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_storage_backend_fails_to_load() {
        let result = Config::from_settings(&settings(&[("storage_backend", "postgres")]));
        assert!(matches!(result, Err(ConfigError::LoadError { .. })));
    }

    #[test]
    fn test_server_config_helpers() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8001,
            request_timeout_seconds: 45,
            max_request_size: 1024,
            public_base_url: None,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(45));
        assert_eq!(config.bind_address(), "127.0.0.1:8001");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::ValidationError {
            message: "Invalid configuration".to_string(),
        };
        assert_eq!(error.to_string(), "Validation error: Invalid configuration");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8001);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_max_request_size(), 1024 * 1024);
        assert_eq!(default_rooms_table(), "HotelRooms");
        assert_eq!(default_menu_table(), "HotelMenuItems");
        assert_eq!(default_bookings_table(), "HotelBookings");
        assert_eq!(default_orders_table(), "HotelOrders");
        assert_eq!(default_region(), "us-west-2");
        assert_eq!(default_service_name(), "hotel-ulin");
        assert_eq!(default_log_level(), "info");
    }
}

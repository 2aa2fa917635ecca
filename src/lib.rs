mod error;
mod models;
mod operations;

pub use error::ConfigError;
pub use models::{DiscoveredEndpoints, Property, Setting};
pub use operations::configurator::env::EnvSettings;
pub use operations::configurator::resolver::ConfigResolver;
pub use operations::discovery_source::remote::RemoteDiscovery;
pub use operations::{Configurator, DiscoverySource};

pub mod services {
    pub mod settings {
        pub use crate::operations::configurator::env::EnvSettings as Env;
    }

    pub mod discovery {
        pub use crate::operations::discovery_source::remote::RemoteDiscovery as Remote;
    }
}

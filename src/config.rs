use crate::crypto::halving::{HalvingParams, AVG_BLOCK_TIME_SECS, BLOCKS_PER_HALVING};
use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub halving: HalvingParams,
    pub cors_permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3001,
            halving: HalvingParams::default(),
            cors_permissive: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> CalcResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| CalcError::Config(format!("SERVER_PORT: {e}")))?;

        let blocks_per_halving = env_var_or("BLOCKS_PER_HALVING", &BLOCKS_PER_HALVING.to_string())
            .parse::<u64>()
            .map_err(|e| CalcError::Config(format!("BLOCKS_PER_HALVING: {e}")))?;

        let avg_block_time_secs =
            env_var_or("AVG_BLOCK_TIME_SECS", &AVG_BLOCK_TIME_SECS.to_string())
                .parse::<u64>()
                .map_err(|e| CalcError::Config(format!("AVG_BLOCK_TIME_SECS: {e}")))?;

        let halving = HalvingParams::new(blocks_per_halving, avg_block_time_secs)
            .map_err(|e| CalcError::Config(e.to_string()))?;

        let cors_permissive = env_var_or("CORS_PERMISSIVE", "true")
            .parse::<bool>()
            .map_err(|e| CalcError::Config(format!("CORS_PERMISSIVE: {e}")))?;

        Ok(Self {
            server_host: env_var_or("SERVER_HOST", "0.0.0.0"),
            server_port,
            halving,
            cors_permissive,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

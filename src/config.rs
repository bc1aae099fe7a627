use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "owl-pay-server")]
#[command(about = "Merchant crypto-payment console server")]
#[command(version)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Public domain for payment links (e.g., "pay.example.com")
    #[arg(long, env = "DOMAIN")]
    pub domain: String,

    /// Seconds an unpaid session waits before lapsing to failed
    #[arg(long, env = "PAYMENT_WINDOW_SECS", default_value = "900")]
    pub window_secs: u64,

    /// Seconds before the simulated confirmation source resolves
    #[arg(long, env = "CONFIRM_DELAY_SECS", default_value = "30")]
    pub confirm_delay_secs: u64,
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn payment_base(&self) -> String {
        format!("https://{}/payment", self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_base_uses_public_domain() {
        let config =
            Config::try_parse_from(["owl-pay-server", "--domain", "pay.example.com"]).unwrap();
        assert_eq!(config.payment_base(), "https://pay.example.com/payment");
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.window_secs, 900);
    }
}

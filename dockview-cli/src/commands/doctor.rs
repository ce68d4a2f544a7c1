use std::path::Path;

use dockview_core::client::ResourceClient;
use dockview_core::config::DockviewConfig;
use dockview_core::feature::Feature;

use crate::adapters::DockerClient;

#[derive(Debug)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl Check {
    fn ok(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            hint: None,
        }
    }

    fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Checks the config, the engine connection and each listing. Returns an
/// error when any check failed.
pub async fn run_doctor(config: &DockviewConfig, config_path: Option<&Path>) -> Result<(), String> {
    println!("dockview doctor\n");

    let mut checks: Vec<Check> = Vec::new();

    println!("Configuration:");
    let config_check = match config_path {
        Some(path) => Check::ok("config", path.display().to_string()),
        None => Check::ok("config", "not found, using defaults"),
    };
    print_check(&config_check);
    checks.push(config_check);
    println!();

    println!("Engine:");
    let host_check = check_host(config);
    print_check(&host_check);
    checks.push(host_check);

    match DockerClient::connect(&config.docker).await {
        Ok(client) => {
            let check = Check::ok("engine", "reachable");
            print_check(&check);
            checks.push(check);
            println!();

            println!("Listings:");
            for check in listing_checks(&client).await {
                print_check(&check);
                checks.push(check);
            }
            client.close();
        }
        Err(e) => {
            let check = Check::fail("engine", e.to_string())
                .with_hint("Start the Docker daemon or set docker.host / DOCKER_HOST");
            print_check(&check);
            checks.push(check);
        }
    }
    println!();

    let failed: Vec<_> = checks.iter().filter(|c| !c.passed).collect();
    if failed.is_empty() {
        println!("All checks passed!");
        return Ok(());
    }

    println!("Issues found:");
    for check in &failed {
        println!("  - {}: {}", check.name, check.message);
        if let Some(hint) = &check.hint {
            println!("    Hint: {}", hint);
        }
    }
    Err(format!("{} check(s) failed", failed.len()))
}

fn print_check(check: &Check) {
    let icon = if check.passed { "✓" } else { "✗" };
    let color = if check.passed { "\x1b[32m" } else { "\x1b[31m" };
    let reset = "\x1b[0m";

    println!(
        "  {}{}{} {}: {}",
        color, icon, reset, check.name, check.message
    );

    if let Some(hint) = &check.hint {
        println!("    └─ {}", hint);
    }
}

fn check_host(config: &DockviewConfig) -> Check {
    if let Some(host) = &config.docker.host {
        return Check::ok("host", format!("{} (config)", host));
    }
    match std::env::var("DOCKER_HOST") {
        Ok(host) if !host.is_empty() => Check::ok("host", format!("{} (DOCKER_HOST)", host)),
        _ => Check::ok("host", "local socket"),
    }
}

/// One check per feature: the record count, or the listing error.
pub async fn listing_checks(client: &dyn ResourceClient) -> Vec<Check> {
    let mut checks = Vec::new();
    for feature in Feature::ALL {
        let result = match feature {
            Feature::Containers => client.list_containers().await.map(|r| r.len()),
            Feature::Images => client.list_images().await.map(|r| r.len()),
            Feature::Volumes => client.list_volumes().await.map(|r| r.len()),
        };
        let name = feature.label().to_lowercase();
        checks.push(match result {
            Ok(count) => Check::ok(name, format!("{} {}", count, feature.noun(count))),
            Err(e) => Check::fail(name, e.to_string()),
        });
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockview_core::client::{ClientError, StaticClient};

    #[tokio::test]
    async fn test_listing_checks_report_counts() {
        let client = StaticClient::demo().unwrap();
        let checks = listing_checks(&client).await;
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.passed));
        assert_eq!(checks[0].name, "containers");
        assert_eq!(checks[0].message, "3 containers");
        assert_eq!(checks[2].message, "2 volumes");
    }

    #[tokio::test]
    async fn test_listing_checks_report_failures() {
        let client = StaticClient::failing(ClientError::Engine {
            operation: "list images",
            message: "denied".into(),
        });
        let checks = listing_checks(&client).await;
        assert!(checks.iter().all(|c| !c.passed));
        assert_eq!(checks[1].message, "list images failed: denied");
    }

    #[test]
    fn test_host_from_config() {
        let mut config = DockviewConfig::default();
        config.docker.host = Some("tcp://10.0.0.2:2375".into());
        let check = check_host(&config);
        assert!(check.passed);
        assert_eq!(check.message, "tcp://10.0.0.2:2375 (config)");
    }
}

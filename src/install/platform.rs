//! Host platform signals consumed by the install prompt.

use serde::Serialize;

use crate::errors::AppError;

/// Operating-system family relevant to install instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Other,
}

impl Platform {
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d)) {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

/// The user's answer to the native install dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// Which call-to-action the prompt presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InstallVariant {
    /// A captured install event can open the platform dialog.
    Native,
    /// iOS without a captured event: Safari "Add to Home Screen" steps.
    IosManual,
    /// Anything else: point at the browser's address-bar install icon.
    GenericManual,
}

impl InstallVariant {
    pub fn resolve(has_native_prompt: bool, platform: Platform) -> Self {
        match (has_native_prompt, platform) {
            (true, _) => InstallVariant::Native,
            (false, Platform::Ios) => InstallVariant::IosManual,
            (false, Platform::Other) => InstallVariant::GenericManual,
        }
    }
}

/// Environment facts read once when the prompt mounts.
pub trait HostEnvironment: Send + Sync {
    /// Whether the app already runs as an installed, standalone window.
    fn is_standalone(&self) -> bool;

    fn user_agent(&self) -> String;
}

/// A captured platform install event. Single use: one dialog per event.
#[async_trait::async_trait]
pub trait DeferredInstallPrompt: Send {
    /// Suppress the platform's own install UI for this event.
    fn prevent_default(&mut self);

    /// Open the native install dialog.
    async fn prompt(&mut self) -> Result<(), AppError>;

    /// Wait for the user's decision. May never resolve if the platform stays silent.
    async fn user_choice(&mut self) -> InstallOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_platform() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        let ipad = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0";
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) Safari/605.1.15";

        assert_eq!(Platform::detect(iphone), Platform::Ios);
        assert_eq!(Platform::detect(ipad), Platform::Ios);
        assert_eq!(Platform::detect("IPOD touch"), Platform::Ios);
        assert_eq!(Platform::detect(android), Platform::Other);
        assert_eq!(Platform::detect(mac), Platform::Other);
    }

    #[test]
    fn test_variant_resolution_is_exhaustive() {
        assert_eq!(InstallVariant::resolve(true, Platform::Ios), InstallVariant::Native);
        assert_eq!(InstallVariant::resolve(true, Platform::Other), InstallVariant::Native);
        assert_eq!(InstallVariant::resolve(false, Platform::Ios), InstallVariant::IosManual);
        assert_eq!(
            InstallVariant::resolve(false, Platform::Other),
            InstallVariant::GenericManual
        );
    }
}

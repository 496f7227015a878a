use std::process::{Command, Stdio};

use doglink::{PopupFeatures, PopupLauncher};
use url::Url;

/// Prints the popup that would be opened.
pub struct PrintLauncher;

impl PopupLauncher for PrintLauncher {
    fn open(&self, url: &Url, target: &str, features: &PopupFeatures) {
        println!("{url}");
        println!("window: {target} ({features})");
    }
}

/// Hands the URL to the platform's URL opener. Spawn failures are only
/// logged.
pub struct SystemLauncher;

impl PopupLauncher for SystemLauncher {
    fn open(&self, url: &Url, target: &str, features: &PopupFeatures) {
        PrintLauncher.open(url, target, features);

        let mut command = opener(url);
        let spawned = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            log::debug!("Could not launch a browser for {url}: {e}");
        }
    }
}

#[cfg(target_os = "macos")]
fn opener(url: &Url) -> Command {
    let mut command = Command::new("open");
    command.arg(url.as_str());
    command
}

#[cfg(target_os = "windows")]
fn opener(url: &Url) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url.as_str()]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(url: &Url) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url.as_str());
    command
}

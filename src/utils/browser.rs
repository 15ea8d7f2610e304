use std::error::Error;

/// Open a URL in the system browser.
///
/// The Discord connect flow is a plain browser navigation on the backend
/// side, so the terminal client hands the URL to the platform launcher.
pub fn open_in_browser(url: &str) -> Result<(), Box<dyn Error>> {
    #[cfg(target_os = "macos")]
    {
        let status = std::process::Command::new("open").arg(url).status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with open".into());
    }
    #[cfg(target_os = "windows")]
    {
        let status = std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with start".into());
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let status = std::process::Command::new("xdg-open").arg(url).status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with xdg-open".into());
    }

    #[allow(unreachable_code)]
    Err(format!("no browser launcher configured for URL: {url}").into())
}

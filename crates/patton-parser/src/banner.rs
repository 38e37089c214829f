//! Banner classification.

use patton_core::BannerType;
use regex::Regex;

/// Checked in order; the first match wins and anything left is `Generic`.
const BANNER_PATTERNS: &[(BannerType, &str)] = &[
    (BannerType::Ssh, r"(?i)(^SSH-\d+\.\d+-|openssh|dropbear)"),
    (
        BannerType::Http,
        r"(?i)(\bHTTP/\d|\bhttpd\b|apache|nginx|lighttpd|microsoft-iis|\bjetty\b|\btomcat\b)",
    ),
    (BannerType::Ftp, r"(?i)(\bftpd?\b|vsftpd|proftpd|pure-ftpd|filezilla)"),
    (BannerType::Smtp, r"(?i)(\besmtp\b|\bsmtp\b|postfix|\bexim\b|sendmail)"),
];

/// Tags banners with the service family they belong to.
pub struct BannerClassifier {
    patterns: Vec<(BannerType, Regex)>,
}

impl BannerClassifier {
    pub fn new() -> Self {
        let patterns = BANNER_PATTERNS
            .iter()
            .filter_map(|(kind, pattern)| match Regex::new(pattern) {
                Ok(regex) => Some((*kind, regex)),
                Err(e) => {
                    log::error!("Invalid banner pattern for {}: {}", kind, e);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn classify(&self, banner: &str) -> BannerType {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(banner))
            .map(|(kind, _)| *kind)
            .unwrap_or(BannerType::Generic)
    }

    /// Resolve the type to send: detected for `Auto`, otherwise the declared one.
    pub fn resolve(&self, banner: &str, declared: BannerType) -> BannerType {
        match declared {
            BannerType::Auto => {
                let detected = self.classify(banner);
                log::debug!("Banner '{}' classified as {}", banner, detected);
                detected
            }
            declared => declared,
        }
    }
}

impl Default for BannerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ssh() {
        let classifier = BannerClassifier::new();
        assert_eq!(
            classifier.classify("SSH-2.0-OpenSSH_7.4p1 Debian-10+deb9u3"),
            BannerType::Ssh
        );
        assert_eq!(classifier.classify("dropbear sshd 2017.75"), BannerType::Ssh);
    }

    #[test]
    fn test_classify_http() {
        let classifier = BannerClassifier::new();
        assert_eq!(
            classifier.classify("Apache httpd extrainfo: SSL-only mode"),
            BannerType::Http
        );
        assert_eq!(classifier.classify("nginx/1.14.0"), BannerType::Http);
    }

    #[test]
    fn test_classify_ftp_and_smtp() {
        let classifier = BannerClassifier::new();
        assert_eq!(classifier.classify("220 ProFTPD 1.3.5 Server"), BannerType::Ftp);
        assert_eq!(classifier.classify("(vsFTPd 3.0.3)"), BannerType::Ftp);
        assert_eq!(
            classifier.classify("220 mail.example.com ESMTP Postfix"),
            BannerType::Smtp
        );
    }

    #[test]
    fn test_unknown_banner_is_generic() {
        let classifier = BannerClassifier::new();
        assert_eq!(classifier.classify("MySQL 5.7.22"), BannerType::Generic);
    }

    #[test]
    fn test_declared_type_is_trusted() {
        let classifier = BannerClassifier::new();
        assert_eq!(
            classifier.resolve("SSH-2.0-OpenSSH_7.4p1", BannerType::Generic),
            BannerType::Generic
        );
        assert_eq!(
            classifier.resolve("SSH-2.0-OpenSSH_7.4p1", BannerType::Auto),
            BannerType::Ssh
        );
    }
}

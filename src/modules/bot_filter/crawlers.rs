//! Bundled generic crawler detector.
//!
//! Recognizes the user-agents of common crawlers, scripted HTTP clients,
//! scanners and headless browsers without any configuration. Only a yes/no
//! answer is exposed.

use regex::Regex;
use std::sync::LazyLock;

/// Known automation tokens. Matched case-insensitively anywhere in the UA.
static CRAWLER_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        bot\b|bot[/\s_;\-\)]|                    # Googlebot/2.1, bingbot, ...
        crawl|spider|scrap|slurp|
        archiver|                               # ia_archiver and friends
        mediapartners-google|adsbot-google|feedfetcher|
        google-inspectiontool|googleother|
        bingpreview|baiduspider|yandex|sogou|
        facebookexternalhit|facebot|embedly|
        pingdom|uptimerobot|statuscake|site24x7|monitor|
        lighthouse|pagespeed|gtmetrix|
        headless|phantomjs|puppeteer|playwright|selenium|webdriver|
        \bcurl/|\bwget/|httpie|libwww|lwp-|
        python-requests|python-urllib|python/|aiohttp|httpx|
        go-http-client|\bjava/|okhttp|apache-httpclient|
        node-fetch|\baxios/|\bgot\s\(|undici|
        \bruby\b|\bperl\b|\bphp/|guzzle|
        masscan|zgrab|nmap|nikto|sqlmap|nuclei|
        gobuster|dirbuster|nessus|openvas|acunetix|
        censys|shodan|netcraft|
        preview|validator|fetcher|checker|
        \(at\)|@[a-z]|https?://                 # contact URL or address in the UA
        ",
    )
    .unwrap()
});

/// A UA that is nothing but `product` or `product/version` is a client
/// library or tool; browsers always carry a platform comment.
static BARE_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.\-]+(/v?\d+(\.\d+)*)?$").unwrap()
});

/// Device names that end in `bot` but belong to phones, not automation.
const BOT_SUFFIXED_DEVICES: &[&str] = &["cubot"];

/// Check whether a user-agent belongs to a known kind of automated client.
///
/// Empty input is never a crawler.
#[must_use]
pub fn is_crawler(user_agent: &str) -> bool {
    let user_agent = user_agent.trim();
    if user_agent.is_empty() {
        return false;
    }
    // No lookbehind in `regex`: drop device tokens before the `bot` checks.
    let scrubbed = BOT_SUFFIXED_DEVICES
        .iter()
        .fold(user_agent.to_lowercase(), |ua, device| ua.replace(device, ""));
    CRAWLER_TOKENS.is_match(&scrubbed) || BARE_PRODUCT.is_match(user_agent)
}

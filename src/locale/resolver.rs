// SPDX-License-Identifier: MPL-2.0
//! Boot-time language selection.
//!
//! Four signals compete for the first-render language, in strict
//! priority order: an activation-URL override, the content/SEO
//! configuration, the system locale, and finally the head of the
//! configured allow-list. No signal can select a code outside the
//! allow-list, which guarantees the chosen language is always one whose
//! resources were requested.

use super::LanguageCode;
use crate::shell::launch::LaunchContext;
use log::debug;

/// Query parameter that forces a language for one activation.
pub const LANG_QUERY_PARAM: &str = "lang";

/// Picks the language to activate on first render.
///
/// An accepted activation override is consumed from `launch` as a side
/// effect; a rejected one (unknown or outside the allow-list) is left in
/// place and the next signal is consulted. With no allow-list at all the
/// literal fallback `en` is returned.
pub fn resolve_language(
    launch: Option<&mut LaunchContext>,
    seo_language: Option<&str>,
    system_locale: Option<&str>,
    available: &[LanguageCode],
) -> LanguageCode {
    if let Some(launch) = launch {
        if let Some(code) = launch
            .param(LANG_QUERY_PARAM)
            .and_then(LanguageCode::parse)
            .filter(|code| available.contains(code))
        {
            // One-shot override: consumed so it cannot survive into a
            // relaunch handoff.
            launch.remove_param(LANG_QUERY_PARAM);
            debug!("language {code} selected by activation override");
            return code;
        }
    }

    if let Some(code) = seo_language
        .and_then(LanguageCode::parse)
        .filter(|code| available.contains(code))
    {
        debug!("language {code} selected by content configuration");
        return code;
    }

    if let Some(code) = system_locale.and_then(|raw| match_system_locale(raw, available)) {
        debug!("language {code} selected by system locale");
        return code;
    }

    match available.first() {
        Some(code) => code.clone(),
        None => LanguageCode::fallback(),
    }
}

/// Matches a raw system locale against the allow-list: exact canonical
/// match first, then the locale's primary subtag (`fr-FR` matches an
/// allow-listed `fr`).
///
/// POSIX-style `.UTF-8` encodings and `@` modifiers are stripped before
/// matching, so values from either the platform API or the environment
/// are acceptable.
fn match_system_locale(raw: &str, available: &[LanguageCode]) -> Option<LanguageCode> {
    let raw = raw
        .split(['.', '@'])
        .next()
        .unwrap_or(raw);
    let code = LanguageCode::parse(raw)?;
    if available.contains(&code) {
        return Some(code);
    }
    let primary = code.primary_subtag();
    available.iter().find(|candidate| **candidate == primary).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(list: &[&str]) -> Vec<LanguageCode> {
        list.iter()
            .map(|code| LanguageCode::parse(code).expect("valid code"))
            .collect()
    }

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse(s).expect("valid code")
    }

    #[test]
    fn activation_override_beats_content_configuration() {
        let mut ctx = LaunchContext::from_query("lang=fr");
        let chosen = resolve_language(
            Some(&mut ctx),
            Some("de"),
            Some("en-US"),
            &allow(&["en", "fr", "de"]),
        );
        assert_eq!(chosen, code("fr"));
    }

    #[test]
    fn accepted_override_is_consumed_from_the_launch_context() {
        let mut ctx = LaunchContext::from_query("lang=fr&ref=banner");
        resolve_language(Some(&mut ctx), None, None, &allow(&["en", "fr"]));
        assert_eq!(ctx.param(LANG_QUERY_PARAM), None);
        assert_eq!(ctx.param("ref"), Some("banner"));
    }

    #[test]
    fn override_outside_allow_list_is_ignored_and_left_in_place() {
        let mut ctx = LaunchContext::from_query("lang=ja");
        let chosen = resolve_language(Some(&mut ctx), Some("fr"), None, &allow(&["en", "fr"]));
        assert_eq!(chosen, code("fr"));
        assert_eq!(ctx.param(LANG_QUERY_PARAM), Some("ja"));
    }

    #[test]
    fn malformed_override_is_ignored() {
        let mut ctx = LaunchContext::from_query("lang=!!!");
        let chosen = resolve_language(Some(&mut ctx), None, None, &allow(&["en"]));
        assert_eq!(chosen, code("en"));
    }

    #[test]
    fn content_configuration_is_used_without_an_override() {
        let chosen = resolve_language(None, Some("fr"), Some("ja"), &allow(&["en", "fr", "ja"]));
        assert_eq!(chosen, code("fr"));
    }

    #[test]
    fn content_configuration_outside_allow_list_is_skipped() {
        let chosen = resolve_language(None, Some("de"), Some("ja"), &allow(&["en", "ja"]));
        assert_eq!(chosen, code("ja"));
    }

    #[test]
    fn system_locale_matches_exactly() {
        let chosen = resolve_language(None, None, Some("ja"), &allow(&["en", "ja"]));
        assert_eq!(chosen, code("ja"));
    }

    #[test]
    fn system_locale_matches_on_primary_subtag() {
        let chosen = resolve_language(None, None, Some("fr-FR"), &allow(&["en", "fr"]));
        assert_eq!(chosen, code("fr"));
    }

    #[test]
    fn posix_locale_suffixes_are_stripped() {
        let chosen = resolve_language(None, None, Some("fr_FR.UTF-8"), &allow(&["en", "fr"]));
        assert_eq!(chosen, code("fr"));
    }

    #[test]
    fn unmatched_signals_fall_back_to_the_allow_list_head() {
        let chosen = resolve_language(None, Some("de"), Some("ko"), &allow(&["vi", "en"]));
        assert_eq!(chosen, code("vi"));
    }

    #[test]
    fn empty_allow_list_falls_back_to_english() {
        let chosen = resolve_language(None, Some("fr"), Some("fr"), &[]);
        assert_eq!(chosen, code("en"));
    }
}

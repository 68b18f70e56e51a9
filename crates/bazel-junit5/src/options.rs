// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Launcher option filtering

const OPTION_PREFIX: &str = "--";

/// Remove the named options from a launcher argument list
///
/// `names` may be given as `select-package` or `--select-package`. An option
/// written as `--name=value` is dropped on its own; a bare `--name` also
/// drops the token that follows it, whatever that token looks like. Every
/// other token is kept in its original order.
#[must_use]
pub fn filter_options<S: AsRef<str>>(args: &[String], names: &[S]) -> Vec<String> {
    let names: Vec<&str> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            name.strip_prefix(OPTION_PREFIX).unwrap_or(name)
        })
        .collect();

    let mut filtered = Vec::with_capacity(args.len());
    let mut tokens = args.iter();
    while let Some(token) = tokens.next() {
        match match_option(token, &names) {
            Some(OptionForm::Inline) => {}
            Some(OptionForm::Separate) => {
                tokens.next();
            }
            None => filtered.push(token.clone()),
        }
    }
    filtered
}

enum OptionForm {
    /// `--name=value`
    Inline,
    /// `--name value`
    Separate,
}

fn match_option(token: &str, names: &[&str]) -> Option<OptionForm> {
    let option = token.strip_prefix(OPTION_PREFIX)?;
    names.iter().find_map(|name| {
        let rest = option.strip_prefix(name)?;
        if rest.is_empty() {
            Some(OptionForm::Separate)
        } else if rest.starts_with('=') {
            Some(OptionForm::Inline)
        } else {
            None
        }
    })
}

//! Path and escaping helpers shared by renderers and templates.

/// Compute a relative URL from one page URL to another (RFC 3986).
///
/// Both arguments are URL paths without leading slash. The last segment of
/// `from` is the current document; the base directory is everything before
/// it, or all of `from` when it ends with `/`.
///
/// # Examples
///
/// ```
/// use guides_render::relative_path;
///
/// assert_eq!(relative_path("guides/install", "guides/usage"), "usage");
/// assert_eq!(relative_path("", "api/index.html"), "api/index.html");
/// assert_eq!(relative_path("guides/", "css/guides.css"), "../css/guides.css");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = "../".repeat(from_dir.len() - common);
    result.push_str(&to_segs[common..].join("/"));

    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}

/// Path to a project-root-relative `target` from inside `sub_folder`.
///
/// Used by templates to link shared assets from documents written to an
/// output sub folder.
///
/// ```
/// use guides_render::root_path;
///
/// assert_eq!(root_path("", "css/guides.css"), "css/guides.css");
/// assert_eq!(root_path("guides/advanced", "css/guides.css"), "../../css/guides.css");
/// ```
pub fn root_path(sub_folder: &str, target: &str) -> String {
    let sub_folder = sub_folder.trim_matches('/');
    if sub_folder.is_empty() {
        return target.trim_start_matches('/').to_owned();
    }
    relative_path(&format!("{sub_folder}/"), target)
}

/// Escape LaTeX special characters.
pub fn latex_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => result.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '~' => result.push_str(r"\textasciitilde{}"),
            '^' => result.push_str(r"\textasciicircum{}"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_deep_to_shallow() {
        assert_eq!(relative_path("guides/advanced/extending", "guides"), "../");
    }

    #[test]
    fn test_relative_path_same_page() {
        assert_eq!(relative_path("guides/index", "guides/index"), "index");
    }

    #[test]
    fn test_relative_path_to_root() {
        assert_eq!(relative_path("guides/", ""), "../");
        assert_eq!(relative_path("", ""), "./");
    }

    #[test]
    fn test_root_path_ignores_surrounding_slashes() {
        assert_eq!(root_path("/guides/", "css/guides.css"), "../css/guides.css");
        assert_eq!(root_path("/", "/css/guides.css"), "css/guides.css");
    }

    #[test]
    fn test_latex_escape() {
        assert_eq!(latex_escape("50% of $x_1$"), r"50\% of \$x\_1\$");
        assert_eq!(latex_escape(r"a\b"), r"a\textbackslash{}b");
        assert_eq!(latex_escape("{~^}"), r"\{\textasciitilde{}\textasciicircum{}\}");
    }
}

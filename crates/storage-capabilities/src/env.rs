//! 环境变量展开工具。
//!
//! 按 `%NAME%` 语法展开字符串中的环境变量引用，未定义的引用原样保留，
//! 借此可以判断 home 目录配置是否真的解析出了路径。

/// 展开 `input` 中所有 `%NAME%` 形式的环境变量引用。
pub fn expand_env_vars(input: &str) -> String {
    expand_env_vars_with(input, |name| std::env::var(name).ok())
}

/// 与 [`expand_env_vars`] 相同，但使用注入的查询函数。
pub fn expand_env_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('%') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('%') {
            // 非空的 %NAME% 对，按查询结果展开；未定义则原样保留。
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => output.push_str(&value),
                    None => {
                        output.push('%');
                        output.push_str(name);
                        output.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                output.push('%');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// 解析 home 目录配置，展开后与原文相同视为未定义。
pub fn resolve_home_folder(home_var: &str) -> Option<String> {
    let expanded = expand_env_vars(home_var);
    if expanded == home_var {
        None
    } else {
        Some(expanded)
    }
}

/// 与 [`resolve_home_folder`] 相同，但使用注入的查询函数。
pub fn resolve_home_folder_with<F>(home_var: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_env_vars_with(home_var, lookup);
    if expanded == home_var {
        None
    } else {
        Some(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/user".to_string()),
            _ => None,
        }
    }

    fn empty_lookup(_name: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_expand_replaces_known_variable() {
        assert_eq!(expand_env_vars_with("%HOME%", home_lookup), "/home/user");
    }

    #[test]
    fn test_expand_keeps_unknown_variable_literal() {
        assert_eq!(
            expand_env_vars_with("%NO_SUCH%", empty_lookup),
            "%NO_SUCH%"
        );
    }

    #[test]
    fn test_expand_preserves_surrounding_text() {
        let lookup = |name: &str| match name {
            "USER" => Some("alice".to_string()),
            _ => None,
        };
        assert_eq!(
            expand_env_vars_with("/data/%USER%/cache", lookup),
            "/data/alice/cache"
        );
    }

    #[test]
    fn test_expand_keeps_unpaired_percent() {
        assert_eq!(expand_env_vars_with("100%", home_lookup), "100%");
        assert_eq!(expand_env_vars_with("%", home_lookup), "%");
    }

    #[test]
    fn test_expand_treats_double_percent_as_literal() {
        assert_eq!(expand_env_vars_with("50%%60", home_lookup), "50%%60");
    }

    #[test]
    fn test_expand_handles_multiple_references() {
        let lookup = |name: &str| match name {
            "A" => Some("1".to_string()),
            "B" => Some("2".to_string()),
            _ => None,
        };
        assert_eq!(expand_env_vars_with("%A%-%B%-%C%", lookup), "1-2-%C%");
    }

    #[test]
    fn test_resolve_home_present() {
        assert_eq!(
            resolve_home_folder_with("%HOME%", home_lookup),
            Some("/home/user".to_string())
        );
    }

    #[test]
    fn test_resolve_home_absent() {
        assert_eq!(resolve_home_folder_with("%HOME%", empty_lookup), None);
    }

    #[test]
    fn test_expand_reads_process_environment() {
        // PATH 在测试环境中总是存在，借它验证走进程环境的封装。
        let path = std::env::var("PATH").expect("PATH should be set");

        assert_eq!(expand_env_vars("%PATH%"), path);
        assert_eq!(
            expand_env_vars("%TEMPSPACE_NO_SUCH_VAR%"),
            "%TEMPSPACE_NO_SUCH_VAR%"
        );
        assert_eq!(resolve_home_folder("%PATH%"), Some(path));
        assert_eq!(resolve_home_folder("%TEMPSPACE_NO_SUCH_VAR%"), None);
    }

    #[test]
    fn test_resolve_home_empty_value_counts_as_present() {
        let lookup = |name: &str| match name {
            "HOME" => Some(String::new()),
            _ => None,
        };
        assert_eq!(
            resolve_home_folder_with("%HOME%", lookup),
            Some(String::new())
        );
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

// 资源引用只接受 http(s) 链接或不带空白的不透明标识，
// 内容本身不做任何解释（文件存储是外部系统的事）
static RESOURCE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://\S+|[A-Za-z0-9._:/-]+)$").expect("Invalid resource regex"));

const RESOURCE_REF_MAX_LEN: usize = 2048;

/// 校验单条资源引用
pub fn validate_resource_ref(reference: &str) -> Result<(), &'static str> {
    if reference.is_empty() {
        return Err("资源引用不能为空");
    }
    if reference.len() > RESOURCE_REF_MAX_LEN {
        return Err("资源引用过长");
    }
    if !RESOURCE_REF_RE.is_match(reference) {
        return Err("资源引用格式无效");
    }
    Ok(())
}

/// 校验一组资源引用，返回第一条错误
pub fn validate_resource_refs(references: &[String]) -> Result<(), &'static str> {
    for reference in references {
        validate_resource_ref(reference)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_references() {
        assert!(validate_resource_ref("https://example.org/sujet.pdf").is_ok());
        assert!(validate_resource_ref("http://intranet/cours/42").is_ok());
        assert!(validate_resource_ref("file-token-123").is_ok());
        assert!(validate_resource_refs(&["a".to_string(), "b-c_d".to_string()]).is_ok());
    }

    #[test]
    fn test_empty_reference_rejected() {
        assert!(validate_resource_ref("").is_err());
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(validate_resource_ref("not a token").is_err());
        assert!(validate_resource_refs(&["ok".to_string(), "bad one".to_string()]).is_err());
    }

    #[test]
    fn test_oversized_reference_rejected() {
        let long = "a".repeat(RESOURCE_REF_MAX_LEN + 1);
        assert!(validate_resource_ref(&long).is_err());
    }
}

/// Canned outputs for the demo code runner. Nothing is compiled or
/// executed; known sample inputs are recognised by substring and anything
/// else gets a generic banner.
pub fn run_snippet(language: &str, code: &str, input: &str) -> String {
    if language == "c" {
        if code.contains("printf") && input.contains("45 22 87") {
            return "Max: 91\nMin: 3\nSum: 376\nAverage: 41.78".to_string();
        }
        if code.contains("scanf") && input.contains('3') {
            return "10\n20\n30".to_string();
        }
        return "Program executed successfully. Output depends on actual C code execution."
            .to_string();
    }

    if code.contains("twoSum") && input.contains("[2,7,11,15]") {
        return "[0,1]".to_string();
    }
    if code.contains("isValid") && input.contains("()[]{}") {
        return "true".to_string();
    }

    "Program executed successfully. Output depends on actual code execution.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_the_c_printf_sample() {
        let out = run_snippet("c", "int main() { printf(\"%d\", max); }", "91 3 45 22 87");
        assert_eq!(out, "Max: 91\nMin: 3\nSum: 376\nAverage: 41.78");
    }

    #[test]
    fn recognises_the_c_scanf_sample() {
        let out = run_snippet("c", "int n; scanf(\"%d\", &n);", "3");
        assert_eq!(out, "10\n20\n30");
    }

    #[test]
    fn recognises_the_two_sum_sample() {
        let out = run_snippet(
            "python",
            "def twoSum(nums, target): ...",
            "[2,7,11,15], target = 9",
        );
        assert_eq!(out, "[0,1]");
    }

    #[test]
    fn recognises_the_valid_parentheses_sample() {
        let out = run_snippet("java", "boolean isValid(String s) { ... }", "()[]{}");
        assert_eq!(out, "true");
    }

    #[test]
    fn unknown_code_gets_the_generic_banner() {
        let out = run_snippet("python", "print('hello')", "whatever");
        assert!(out.starts_with("Program executed successfully."));
    }

    #[test]
    fn c_fallback_banner_mentions_c() {
        let out = run_snippet("c", "int main() { return 0; }", "");
        assert!(out.contains("actual C code execution"));
    }
}

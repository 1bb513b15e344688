#![forbid(unsafe_code)]

// ***************************************************************************
//                                Constants
// ***************************************************************************
// The fixed prefix prepended to every echoed input.
const RESPONSE_PREFIX : &str = "You said: ";

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// generate_response:
// ---------------------------------------------------------------------------
/** Produce the bot response for a user input.  The input is echoed back
 * behind a fixed prefix with no trimming, escaping or length limit.
 */
pub fn generate_response(input_text: &str) -> String {
    RESPONSE_PREFIX.to_owned() + input_text
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::generate_response;

    #[test]
    fn echoes_with_prefix() {
        assert_eq!(generate_response("hello"), "You said: hello");
    }

    #[test]
    fn empty_input_yields_bare_prefix() {
        assert_eq!(generate_response(""), "You said: ");
    }

    #[test]
    fn input_is_not_trimmed() {
        assert_eq!(generate_response("  spaced  "), "You said:   spaced  ");
    }

    #[test]
    fn input_is_not_escaped() {
        assert_eq!(generate_response("<b>&\"'</b>"), "You said: <b>&\"'</b>");
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(generate_response("héllo wörld 你好"), "You said: héllo wörld 你好");
    }
}

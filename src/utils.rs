use core::ffi::{c_char, CStr};

///Converts static C string produced by engine into Rust one.
///
///Returns `None` for null pointer or non UTF-8 content.
pub(crate) fn convert_c_str(text: *const c_char) -> Option<&'static str> {
    if text.is_null() {
        return None;
    }

    let text = unsafe {
        CStr::from_ptr(text)
    };
    text.to_str().ok()
}

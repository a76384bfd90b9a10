pub mod fs_json_util;
pub mod html_util;

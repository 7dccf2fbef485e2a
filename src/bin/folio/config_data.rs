use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# Site URL, or a local directory with a posts/ folder.
# For a directory relative to the executable use ${exe_dir}/location
[site]
base = "https://kearharry.design"
posts = [
  "游戏/Game_1_拯救森林.md",
  "C++/C++面试题（1）.md",
]

[[categories]]
name = "C++"
items = ["面试题", "算法题"]

[[categories]]
name = "游戏"
items = ["独立游戏", "游戏攻略", "游戏设计"]

[[tracks]]
title = "午后放松"
artist = "舒缓节拍"
url = "/music/1.mp3"

# sequence, loop_all, loop_one or shuffle
[player]
default_mode = "loop_all"
volume = 0.6
autoplay = true
simulated_track_secs = 180

[i18n]
default_language = "zh"

[translations.zh]
"home.all" = "全部"
"post.not_found" = "文章未找到"

[translations.en]
"home.all" = "All"
"post.not_found" = "Post not found"
"游戏" = "Game"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let cfg = folio::config::parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.site.posts.len(), 2);
        assert_eq!(cfg.tracks.len(), 1);
    }
}

#[cfg(test)]
pub const FOREST_POST: &str = "---
title: 拯救森林：Unity 2D 塔防
date: 2025-03-01
excerpt: 一个关于守护森林的塔防小游戏
categories: [独立游戏, \"游戏设计\"]
---

## 起因

期末作业要做一个 Unity 小游戏，于是有了这款塔防。

## 玩法

在森林的小路旁放置防御塔，阻止伐木机器人前进。

后续会加入更多关卡，敬请期待。
";

#[cfg(test)]
pub const FOG_POST: &str = "---
title: 迷雾森林
date: 2025-04-12
excerpt: Unity 2D 横板冒险游戏
category: 游戏攻略
---
在迷雾中寻找出口，记录通关路线。
";

#[cfg(test)]
pub const INTERVIEW_POST: &str = "---
title: C++面试题（1）
date: 2025-05-20
category: 面试题
---
虚函数表是如何工作的？
";

#[cfg(test)]
pub const TEST_CONFIG: &str = r#"
[site]
base = "https://kearharry.design"
posts = [
  "游戏/Game_1_拯救森林.md",
  "游戏/Game_2_迷雾森林.md",
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

[[tracks]]
title = "静谧钢琴"
artist = "治愈系"
url = "/music/2.mp3"

[player]
default_mode = "sequence"
volume = 0.4

[i18n]
default_language = "en"

[translations.zh]
"home.all" = "全部"
"游戏" = "游戏"

[translations.en]
"home.all" = "All"
"游戏" = "Game"
"#;

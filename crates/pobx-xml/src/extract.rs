//! Schema-aware extraction of the build record.
//!
//! Each section is looked up independently. A missing section or attribute
//! never fails; it resolves through [`pobx_common::defaults`].

use pobx_common::defaults::{self, DISABLED, UNKNOWN_GEM, UNKNOWN_SKILL};
use pobx_common::{
    BuildRecord, Gem, Item, PassiveNodes, PassiveTree, PlayerInfo, PlayerStats, Skill,
};
use tracing::info;

use crate::Element;

const ITEM_LEVEL: &str = "Item Level";
const LEVEL_REQ: &str = "LevelReq";
const QUALITY: &str = "Quality";
const SOCKETS: &str = "Sockets";
const RUNE: &str = "Rune";
const RARITY: &str = "Rarity";

/// Labels whose lines are never treated as item modifiers.
const NON_MODIFIER_LABELS: [&str; 6] = [ITEM_LEVEL, QUALITY, SOCKETS, RARITY, LEVEL_REQ, RUNE];

/// Extract every section of the build record from a parsed document.
pub fn extract(root: &Element) -> BuildRecord {
    let record = BuildRecord {
        player_info: extract_player_info(root),
        player_stats: extract_player_stats(root),
        passive_tree: PassiveTree {
            nodes: PassiveNodes::Raw(extract_passive_nodes(root)),
        },
        skills: extract_skills(root),
        items: extract_items(root),
    };

    info!(
        stats = record.player_stats.len(),
        skills = record.skills.len(),
        items = record.items.len(),
        "build record extracted"
    );

    record
}

/// Level, class and ascendancy from the first `Build` below the root.
///
/// Some exports wrap a second `Build` inside the first; when present, the
/// inner one carries the attributes.
pub fn extract_player_info(root: &Element) -> PlayerInfo {
    let Some(outer) = root.find("Build") else {
        return PlayerInfo::default();
    };
    let build = outer.find("Build").unwrap_or(outer);

    PlayerInfo {
        level: defaults::or_unknown(build.attr("level")),
        class: defaults::or_unknown(build.attr("className")),
        ascendancy: defaults::or_unknown(build.attr("ascendClassName")),
    }
}

/// `stat` to `value` for every `PlayerStat` element.
///
/// Elements without a `stat` attribute are dropped. A stat literally named
/// "Unknown Stat" is an ordinary key.
pub fn extract_player_stats(root: &Element) -> PlayerStats {
    let mut stats = PlayerStats::new();
    for element in root.find_all("PlayerStat") {
        if let Some(name) = element.attr("stat") {
            stats.insert(name, defaults::or_unknown(element.attr("value")));
        }
    }
    stats
}

/// Raw node ids from `Tree`/`Spec/@nodes`, split on commas.
pub fn extract_passive_nodes(root: &Element) -> Vec<String> {
    root.find("Tree")
        .and_then(|tree| tree.find("Spec"))
        .and_then(|spec| spec.attr("nodes"))
        .filter(|nodes| !nodes.is_empty())
        .map(|nodes| nodes.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Every `Skill` under the first `Skills` element, with its gems.
pub fn extract_skills(root: &Element) -> Vec<Skill> {
    let Some(section) = root.find("Skills") else {
        return Vec::new();
    };

    section
        .find_all("Skill")
        .map(|skill| Skill {
            label: skill_label(skill),
            enabled: defaults::or_default(skill.attr("enabled"), DISABLED),
            gems: skill.find_all("Gem").map(extract_gem).collect(),
        })
        .collect()
}

fn skill_label(skill: &Element) -> String {
    match (skill.attr("label"), skill.text.as_deref()) {
        (Some(label), _) => label.to_string(),
        (None, Some(text)) => text.trim().to_string(),
        (None, None) => UNKNOWN_SKILL.to_string(),
    }
}

fn extract_gem(gem: &Element) -> Gem {
    Gem {
        name: defaults::or_default(gem.attr("nameSpec"), UNKNOWN_GEM),
        level: defaults::or_unknown(gem.attr("level")),
        quality: defaults::or_unknown(gem.attr("quality")),
        enabled: defaults::or_default(gem.attr("enabled"), DISABLED),
    }
}

/// Every `Item` that is a direct child of an `Items` element.
pub fn extract_items(root: &Element) -> Vec<Item> {
    root.find_all("Items")
        .flat_map(|items| items.children_named("Item"))
        .map(extract_item)
        .collect()
}

/// Recover item fields from the element's text body.
///
/// Lines 0, 1 and 2 are taken as rarity, name and type. Labeled fields come
/// from the first line containing the label, as the text after the last
/// `": "`. Any line containing a positional line or a known label is not a
/// modifier. All matching is by substring, so a modifier that happens to
/// mention a label (e.g. "Quality") is classified as that label.
pub fn extract_item(item: &Element) -> Item {
    let body = item.text.as_deref().map(str::trim).unwrap_or("");
    let lines: Vec<&str> = if body.is_empty() {
        Vec::new()
    } else {
        body.split('\n').collect()
    };

    let labeled = |label: &str| {
        defaults::or_unknown(
            lines
                .iter()
                .find(|line| line.contains(label))
                .map(|line| line.rsplit(": ").next().unwrap_or(*line).trim()),
        )
    };

    let positional = &lines[..lines.len().min(3)];
    let modifiers = lines
        .iter()
        .filter(|line| {
            !positional.iter().any(|p| line.contains(p))
                && !NON_MODIFIER_LABELS.iter().any(|label| line.contains(label))
        })
        .map(|line| line.to_string())
        .collect();

    Item {
        id: defaults::or_unknown(item.attr("id")),
        name: defaults::nth_or_unknown(&lines, 1),
        item_type: defaults::nth_or_unknown(&lines, 2),
        rarity: defaults::nth_or_unknown(&lines, 0),
        level: labeled(ITEM_LEVEL),
        required_level: labeled(LEVEL_REQ),
        quality: labeled(QUALITY),
        sockets: labeled(SOCKETS),
        rune: labeled(RUNE),
        modifiers,
    }
}

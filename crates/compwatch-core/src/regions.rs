use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Jiangsu and Anhui county / county-level-city names.
const DEFAULT_COUNTY_NAMES: &[&str] = &[
    // Jiangsu
    "句容", "丹阳", "扬中", "沛县", "丰县", "睢宁", "新沂", "邳州", "溧阳", "金坛", "如皋", "海门",
    "启东", "如东", "海安", "东台", "大丰", "射阳", "建湖", "阜宁", "滨海", "响水", "沭阳", "泗阳",
    "泗洪", "宝应", "高邮", "仪征", "靖江", "泰兴", "兴化",
    // Anhui
    "肥东", "肥西", "长丰", "庐江", "巢湖", "无为", "含山", "和县", "当涂", "繁昌", "南陵", "芜湖县",
    "怀远", "五河", "固镇", "濉溪", "蒙城", "涡阳", "利辛", "砀山", "萧县", "灵璧", "泗县", "天长",
    "明光", "来安", "全椒", "定远", "凤阳", "凤台", "寿县", "霍邱", "舒城", "金寨", "霍山", "桐城",
    "怀宁", "太湖", "宿松", "望江", "岳西", "潜山", "广德", "宁国", "郎溪", "绩溪", "旌德", "泾县",
];

/// Urban district and well-known urban area names, grouped by city.
const DEFAULT_DISTRICT_NAMES: &[&str] = &[
    // Nanjing
    "江宁", "建邺", "鼓楼", "玄武", "秦淮", "栖霞", "雨花", "浦口", "六合", "溧水", "高淳", "仙林",
    "江浦", "大厂", "桥北", "马群", "尧化", "板桥", "油坊桥",
    // Suzhou
    "姑苏", "吴中", "相城", "吴江", "虎丘", "工业园", "昆山", "太仓", "常熟", "张家港",
    // Wuxi
    "梁溪", "锡山", "惠山", "滨湖", "新吴", "江阴", "宜兴",
    // Changzhou
    "天宁", "钟楼", "新北", "武进",
    // Hefei
    "蜀山", "庐阳", "包河", "瑶海", "高新", "经开", "新站",
    // Wuhu
    "弋江", "镜湖", "鸠江",
    // Bengbu
    "龙子湖", "蚌山", "禹会", "淮上",
    // Xuzhou
    "铜山", "云龙", "泉山", "贾汪",
    // Nantong
    "崇川", "港闸", "通州",
    // Taizhou
    "海陵", "高港", "姜堰",
    // Yancheng
    "亭湖", "盐都",
    // Huai'an
    "清江浦", "淮阴", "淮安区", "洪泽",
    // Suqian
    "宿城", "宿豫",
    // Zhenjiang
    "京口", "润州", "丹徒",
    // Yangzhou
    "广陵", "邗江", "江都",
];

/// County, township and village administrative suffixes.
const DEFAULT_COUNTY_KEYWORDS: &[&str] = &["县", "镇", "乡"];

/// District suffix plus street, road, plaza, avenue and mall-brand tokens.
const DEFAULT_URBAN_KEYWORDS: &[&str] = &["区", "路", "街", "广场", "大道", "万达", "吾悦", "万象"];

/// Curated lists the region classifier matches store names against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLists {
    pub county_names: Vec<String>,
    pub district_names: Vec<String>,
    #[serde(default = "default_county_keywords")]
    pub county_keywords: Vec<String>,
    #[serde(default = "default_urban_keywords")]
    pub urban_keywords: Vec<String>,
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_county_keywords() -> Vec<String> {
    to_owned_list(DEFAULT_COUNTY_KEYWORDS)
}

fn default_urban_keywords() -> Vec<String> {
    to_owned_list(DEFAULT_URBAN_KEYWORDS)
}

impl Default for RegionLists {
    fn default() -> Self {
        Self {
            county_names: to_owned_list(DEFAULT_COUNTY_NAMES),
            district_names: to_owned_list(DEFAULT_DISTRICT_NAMES),
            county_keywords: default_county_keywords(),
            urban_keywords: default_urban_keywords(),
        }
    }
}

/// Load and validate curated region lists from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_region_lists(path: &Path) -> Result<RegionLists, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let lists: RegionLists = serde_yaml::from_str(&content)?;

    validate_region_lists(&lists)?;

    Ok(lists)
}

fn validate_region_lists(lists: &RegionLists) -> Result<(), ConfigError> {
    if lists.county_names.is_empty() {
        return Err(ConfigError::Validation(
            "county_names must not be empty".to_string(),
        ));
    }
    if lists.district_names.is_empty() {
        return Err(ConfigError::Validation(
            "district_names must not be empty".to_string(),
        ));
    }

    for (list_name, entries) in [
        ("county_names", &lists.county_names),
        ("district_names", &lists.district_names),
        ("county_keywords", &lists.county_keywords),
        ("urban_keywords", &lists.urban_keywords),
    ] {
        let mut seen = HashSet::new();
        for entry in entries {
            if entry.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{list_name} contains a blank entry"
                )));
            }
            if !seen.insert(entry.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate entry in {list_name}: '{entry}'"
                )));
            }
        }
    }

    Ok(())
}

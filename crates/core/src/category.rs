//! Transformation functions for esa category responses

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category entry from the esa API
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub has_child: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ParentCategory {
    #[serde(default)]
    pub current_category: Option<Value>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

/// Response of `GET /categories` and `GET /categories/top`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CategoryList {
    #[serde(default)]
    pub current_category: Option<Value>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub parent_categories: Option<Vec<ParentCategory>>,
    #[serde(default)]
    pub readme: Option<Value>,
    #[serde(default)]
    pub no_category: Option<Category>,
    #[serde(default)]
    pub descendant_posts: Option<Value>,
    #[serde(default)]
    pub posts: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub total_count: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub per_page: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub page: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub prev_page: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub next_page: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub max_per_page: Option<Value>,
}

/// Keep an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryOutput {
    pub full_name: String,
    pub count: u64,
    pub has_child: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParentCategoryOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_category: Option<Value>,
    pub categories: Vec<CategoryOutput>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryListOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_category: Option<Value>,
    pub categories: Vec<CategoryOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_categories: Option<Vec<ParentCategoryOutput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_category: Option<CategoryOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendant_posts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_page: Option<Value>,
}

pub fn transform_category(category: Category) -> CategoryOutput {
    CategoryOutput {
        full_name: category.full_name,
        count: category.count,
        has_child: category.has_child.unwrap_or(false),
    }
}

fn transform_categories(categories: Option<Vec<Category>>) -> Vec<CategoryOutput> {
    categories
        .unwrap_or_default()
        .into_iter()
        .map(transform_category)
        .collect()
}

/// Transform every category in the list, including parents and the
/// uncategorized bucket. Posts, readme and pagination pass through.
pub fn transform_category_list(list: CategoryList) -> CategoryListOutput {
    CategoryListOutput {
        current_category: list.current_category,
        categories: transform_categories(list.categories),
        parent_categories: list.parent_categories.map(|parents| {
            parents
                .into_iter()
                .map(|parent| ParentCategoryOutput {
                    current_category: parent.current_category,
                    categories: transform_categories(parent.categories),
                })
                .collect()
        }),
        readme: list.readme,
        no_category: list.no_category.map(transform_category),
        descendant_posts: list.descendant_posts,
        posts: list.posts,
        total_count: list.total_count,
        per_page: list.per_page,
        page: list.page,
        prev_page: list.prev_page,
        next_page: list.next_page,
        max_per_page: list.max_per_page,
    }
}

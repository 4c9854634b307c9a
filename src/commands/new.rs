//! Create a new post or draft

use anyhow::Result;
use chrono::Utc;
use std::fs;

use crate::Jekyll;

/// Create a new post/draft file
pub fn create_post(jekyll: &Jekyll, title: &str, layout: &str, path: Option<&str>) -> Result<()> {
    let now = Utc::now().with_timezone(&jekyll.config.timezone);

    let target_dir = match layout {
        "draft" => jekyll.source_dir.join(&jekyll.config.drafts_dir),
        _ => jekyll.posts_dir.clone(),
    };
    fs::create_dir_all(&target_dir)?;

    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let slug = slug::slugify(title);
        jekyll
            .config
            .new_post_name
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
            .replace(":title", &slug)
    };

    let file_path = target_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\nlayout: {}\ntitle: {}\ndate: {}\n---\n",
        if layout == "draft" { "post" } else { layout },
        title,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(jekyll: &Jekyll, title: &str, layout: Option<&str>) -> Result<()> {
    let layout = layout.unwrap_or(&jekyll.config.default_layout);
    create_post(jekyll, title, layout, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let jekyll = Jekyll::new(dir.path()).unwrap();

        create_post(&jekyll, "Hello World", "post", None).unwrap();

        let entries: Vec<_> = fs::read_dir(&jekyll.posts_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name().to_string_lossy().to_string();
        assert!(name.ends_with("-hello-world.md"));

        let content = fs::read_to_string(entries[0].path()).unwrap();
        assert!(content.contains("title: Hello World"));
    }

    #[test]
    fn test_create_post_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let jekyll = Jekyll::new(dir.path()).unwrap();

        create_post(&jekyll, "Hello", "post", None).unwrap();
        assert!(create_post(&jekyll, "Hello", "post", None).is_err());
    }
}

use std::io::Write;

use anyhow::Result;
use clap::Args;
use dr_core::SiteProfile;
use dr_dedup::TagRule;

#[derive(Debug, Args)]
pub struct TagArgs {
    /// Category label text
    #[arg(short, long)]
    pub category: String,

    /// Current value of the tag target
    #[arg(long)]
    pub value: String,

    /// Phrase that must appear in the category
    #[arg(long)]
    pub trigger: Option<String>,

    /// Prefix to prepend
    #[arg(long)]
    pub prefix: Option<String>,
}

impl TagArgs {
    pub fn rule(&self) -> TagRule {
        let site = SiteProfile::default();
        TagRule::new(
            self.trigger.clone().unwrap_or(site.trigger_phrase),
            self.prefix.clone().unwrap_or(site.tag_prefix),
        )
    }

    /// Prints the tagged value, or the value unchanged when the rule doesn't fire.
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match self.rule().apply(&self.category, &self.value) {
            Some(tagged) => writeln!(out, "{tagged}")?,
            None => {
                tracing::info!(category = %self.category, "tag rule did not fire");
                writeln!(out, "{}", self.value)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(category: &str, value: &str, trigger: Option<&str>) -> String {
        let args = TagArgs {
            category: category.into(),
            value: value.into(),
            trigger: trigger.map(String::from),
            prefix: None,
        };
        let mut out = Vec::new();
        args.execute(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tag_fires() {
        assert_eq!(run("생활용품 기타", "수건", None), "비브랜드 수건\n");
    }

    #[test]
    fn test_tag_idempotent_and_custom_trigger() {
        assert_eq!(run("생활용품", "비브랜드 수건", None), "비브랜드 수건\n");
        assert_eq!(run("주방용품", "냄비", Some("주방")), "비브랜드 냄비\n");
        assert_eq!(run("주방용품", "냄비", None), "냄비\n");
    }
}

pub mod latest;

use crate::cli::registry::{Feature, FeatureRegistry};
use crate::context::Context;
use crate::error::Result;
use crate::pipeline::DeployPipeline;

const ABOUT: &str = "Deploys project with the configuration in the same folder via selected kubernetes context";
const SUMMARY: &str = "deploy project with the configuration in the same folder via selected kubernetes context";

/// `deploy [variant]`: optional variant first, then the full pipeline.
pub struct Deploy {
    variants: FeatureRegistry,
}

impl Deploy {
    pub fn new() -> Result<Self> {
        let variants = FeatureRegistry::new("deploy", ABOUT, SUMMARY).with(latest::Latest)?;
        Ok(Self { variants })
    }
}

impl Feature for Deploy {
    fn name(&self) -> &str {
        "deploy"
    }

    fn about(&self) -> &str {
        ABOUT
    }

    fn info(&self) -> String {
        self.variants.info()
    }

    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        let project_dir = ctx.settings().working_dir.clone();
        DeployPipeline::new(project_dir).run(ctx, |ctx| {
            if args.is_empty() {
                Ok(())
            } else {
                self.variants.dispatch(ctx, args)
            }
        })
    }
}

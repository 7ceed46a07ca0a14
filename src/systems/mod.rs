pub mod api;
pub mod catalog;
pub mod filesystem;
pub mod organizational;

use crate::error::Result;
use crate::types::estimation::ReachEstimation;
use crate::types::privilege::PrivilegeSet;

/// Something that declares privileges and can estimate how far they reach.
pub trait PowerSystem {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn privileges(&self) -> PrivilegeSet;

    fn can_perform(&self, action: &str) -> bool {
        self.privileges().permits(action)
    }

    fn limitations(&self) -> Vec<String> {
        self.privileges().limitations()
    }

    fn estimate_minimum_reach(&self) -> Result<ReachEstimation>;
}

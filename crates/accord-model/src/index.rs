// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use accord_core::utils::index::{TypedIndex, TypedIndexTag};

macro_rules! define_index {
    ($(#[$doc:meta])* $tag:ident, $alias:ident, $name:literal) => {
        #[doc = concat!("A tag type for ", $name, " values.")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $tag;

        impl TypedIndexTag for $tag {
            const NAME: &'static str = $name;
        }

        $(#[$doc])*
        pub type $alias = TypedIndex<$tag>;
    };
}

define_index!(
    /// Position of a suitor in a stable marriage game.
    SuitorIndexTag, SuitorIndex, "SuitorIndex"
);
define_index!(
    /// Position of a reviewer in a stable marriage game.
    ReviewerIndexTag, ReviewerIndex, "ReviewerIndex"
);
define_index!(
    /// Position of a resident in a hospital-resident game.
    ResidentIndexTag, ResidentIndex, "ResidentIndex"
);
define_index!(
    /// Position of a hospital in a hospital-resident game.
    HospitalIndexTag, HospitalIndex, "HospitalIndex"
);
define_index!(
    /// Position of a player in a stable roommates game.
    RoommateIndexTag, RoommateIndex, "RoommateIndex"
);
define_index!(
    /// Position of a student in a student allocation game.
    StudentIndexTag, StudentIndex, "StudentIndex"
);
define_index!(
    /// Position of a project in a student allocation game.
    ProjectIndexTag, ProjectIndex, "ProjectIndex"
);
define_index!(
    /// Position of a supervisor in a student allocation game.
    SupervisorIndexTag, SupervisorIndex, "SupervisorIndex"
);

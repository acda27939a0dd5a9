// Resolution is deliberately narrow: an exact file, or the same path with `.js` appended.
// There is no node_modules lookup, no `package.json` handling and no directory index.

mod resolver;

pub use crate::resolver::{JS_EXTENSION, Resolver};

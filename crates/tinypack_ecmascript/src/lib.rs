mod ecma_compiler;
mod module_lowering;

pub use crate::ecma_compiler::EcmaCompiler;

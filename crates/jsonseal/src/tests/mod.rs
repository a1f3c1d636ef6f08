mod arbitrary;
mod chunking;
mod support;

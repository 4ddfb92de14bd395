mod hierarchy;
mod minimal_jdk;
